use super::domain::{AsyncJobResponse, SecurityGroup};
use super::options::{AccountInDomainOptions, ListSecurityGroupsOptions};
use super::CloudStackApi;
use crate::core::fallback::Fallback;
use crate::core::http::HttpRequestBuilder;
use crate::core::options::{join_comma, RequestOptions};
use crate::utils::error::Result;
use tracing::info;

const LIST: &str = "listSecurityGroups";
const AUTHORIZE: &str = "authorizeSecurityGroupIngress";
const KEY: &str = "securitygroup";

/// `usersecuritygrouplist[n].account` / `usersecuritygrouplist[n].group`, in order.
fn with_user_groups<I, K, V>(mut builder: HttpRequestBuilder, account_groups: I) -> HttpRequestBuilder
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (index, (account, group)) in account_groups.into_iter().enumerate() {
        builder = builder
            .add_query_param(format!("usersecuritygrouplist[{index}].account"), account.as_ref())
            .add_query_param(format!("usersecuritygrouplist[{index}].group"), group.as_ref());
    }
    builder
}

/// Security groups and their ingress rules, for zones with basic networking.
///
/// Each authorize call opens either a port range or an ICMP type/code, to
/// CIDRs or to other accounts' groups. All of them answer an async job.
#[derive(Debug, Clone)]
pub struct SecurityGroupApi {
    api: CloudStackApi,
}

impl SecurityGroupApi {
    pub(crate) fn new(api: CloudStackApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, options: &ListSecurityGroupsOptions) -> Result<Vec<SecurityGroup>> {
        let builder = options.apply_to(self.api.list_command(LIST));
        self.api.call_list(LIST, KEY, builder).await.empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<SecurityGroup>> {
        self.get_where("id", id).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<SecurityGroup>> {
        self.get_where("securitygroupname", name).await
    }

    pub async fn create(&self, name: &str) -> Result<SecurityGroup> {
        info!(name, "Creating security group");
        let builder = self
            .api
            .command("createSecurityGroup")
            .add_query_param("name", name);
        self.api.call_one("createSecurityGroup", KEY, builder).await
    }

    pub async fn authorize_ingress_ports_to_cidrs<I, S>(
        &self,
        security_group_id: &str,
        protocol: &str,
        start_port: u16,
        end_port: u16,
        cidrs: I,
        options: &AccountInDomainOptions,
    ) -> Result<AsyncJobResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let builder = self
            .ports(security_group_id, protocol, start_port, end_port)
            .add_query_param("cidrlist", join_comma(cidrs));
        self.api.call(AUTHORIZE, options.apply_to(builder)).await
    }

    pub async fn authorize_ingress_ports_to_security_groups<I, K, V>(
        &self,
        security_group_id: &str,
        protocol: &str,
        start_port: u16,
        end_port: u16,
        account_groups: I,
        options: &AccountInDomainOptions,
    ) -> Result<AsyncJobResponse>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let builder = with_user_groups(
            self.ports(security_group_id, protocol, start_port, end_port),
            account_groups,
        );
        self.api.call(AUTHORIZE, options.apply_to(builder)).await
    }

    pub async fn authorize_ingress_icmp_to_cidrs<I, S>(
        &self,
        security_group_id: &str,
        icmp_code: i32,
        icmp_type: i32,
        cidrs: I,
        options: &AccountInDomainOptions,
    ) -> Result<AsyncJobResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let builder = self
            .icmp(security_group_id, icmp_code, icmp_type)
            .add_query_param("cidrlist", join_comma(cidrs));
        self.api.call(AUTHORIZE, options.apply_to(builder)).await
    }

    pub async fn authorize_ingress_icmp_to_security_groups<I, K, V>(
        &self,
        security_group_id: &str,
        icmp_code: i32,
        icmp_type: i32,
        account_groups: I,
        options: &AccountInDomainOptions,
    ) -> Result<AsyncJobResponse>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let builder = with_user_groups(
            self.icmp(security_group_id, icmp_code, icmp_type),
            account_groups,
        );
        self.api.call(AUTHORIZE, options.apply_to(builder)).await
    }

    /// `None` when the rule is already gone.
    pub async fn revoke_ingress_rule(
        &self,
        id: &str,
        options: &AccountInDomainOptions,
    ) -> Result<Option<AsyncJobResponse>> {
        let builder = self
            .api
            .command("revokeSecurityGroupIngress")
            .add_query_param("id", id);
        self.api
            .call("revokeSecurityGroupIngress", options.apply_to(builder))
            .await
            .null_on_not_found()
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let builder = self
            .api
            .command("deleteSecurityGroup")
            .add_query_param("id", id);
        self.api.call_void(builder).await.void_on_not_found()
    }

    fn ports(&self, security_group_id: &str, protocol: &str, start: u16, end: u16) -> HttpRequestBuilder {
        self.api
            .command(AUTHORIZE)
            .add_query_param("securitygroupid", security_group_id)
            .add_query_param("protocol", protocol)
            .add_query_param("startport", start.to_string())
            .add_query_param("endport", end.to_string())
    }

    fn icmp(&self, security_group_id: &str, icmp_code: i32, icmp_type: i32) -> HttpRequestBuilder {
        self.api
            .command(AUTHORIZE)
            .add_query_param("protocol", "ICMP")
            .add_query_param("securitygroupid", security_group_id)
            .add_query_param("icmpcode", icmp_code.to_string())
            .add_query_param("icmptype", icmp_type.to_string())
    }

    async fn get_where(&self, key: &str, value: &str) -> Result<Option<SecurityGroup>> {
        let builder = self.api.list_command(LIST).add_query_param(key, value);
        Ok(self
            .api
            .call_named(LIST, KEY, builder)
            .await
            .null_on_not_found()?
            .flatten())
    }
}
