use super::domain::{AsyncCreateResponse, FirewallProtocol, FirewallRule, PortForwardingProtocol, PortForwardingRule};
use super::options::{
    CreateFirewallRuleOptions, CreatePortForwardingRuleOptions, ListFirewallRulesOptions,
    ListPortForwardingRulesOptions,
};
use super::CloudStackApi;
use crate::core::fallback::Fallback;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;

const FIREWALL_KEY: &str = "firewallrule";
const PORT_FORWARDING_KEY: &str = "portforwardingrule";

/// Ingress, egress and port forwarding rules on public addresses.
///
/// Lists answer empty and gets answer `None` when the server says 404;
/// deleting a rule that is already gone succeeds.
#[derive(Debug, Clone)]
pub struct FirewallApi {
    api: CloudStackApi,
}

impl FirewallApi {
    pub(crate) fn new(api: CloudStackApi) -> Self {
        Self { api }
    }

    pub async fn list_firewall_rules(
        &self,
        options: &ListFirewallRulesOptions,
    ) -> Result<Vec<FirewallRule>> {
        self.list("listFirewallRules", FIREWALL_KEY, options).await
    }

    pub async fn get_firewall_rule(&self, id: &str) -> Result<Option<FirewallRule>> {
        self.get("listFirewallRules", FIREWALL_KEY, id).await
    }

    pub async fn create_firewall_rule_for_ip_and_protocol(
        &self,
        ip_address_id: &str,
        protocol: FirewallProtocol,
        options: &CreateFirewallRuleOptions,
    ) -> Result<AsyncCreateResponse> {
        let builder = self
            .api
            .command("createFirewallRule")
            .add_query_param("ipaddressid", ip_address_id)
            .add_query_param("protocol", protocol.as_str());
        self.api
            .call("createFirewallRule", options.apply_to(builder))
            .await
    }

    pub async fn delete_firewall_rule(&self, id: &str) -> Result<()> {
        self.delete("deleteFirewallRule", id).await
    }

    pub async fn list_egress_firewall_rules(
        &self,
        options: &ListFirewallRulesOptions,
    ) -> Result<Vec<FirewallRule>> {
        self.list("listEgressFirewallRules", FIREWALL_KEY, options).await
    }

    pub async fn get_egress_firewall_rule(&self, id: &str) -> Result<Option<FirewallRule>> {
        self.get("listEgressFirewallRules", FIREWALL_KEY, id).await
    }

    pub async fn create_egress_firewall_rule_for_network_and_protocol(
        &self,
        network_id: &str,
        protocol: FirewallProtocol,
        options: &CreateFirewallRuleOptions,
    ) -> Result<AsyncCreateResponse> {
        let builder = self
            .api
            .command("createEgressFirewallRule")
            .add_query_param("networkid", network_id)
            .add_query_param("protocol", protocol.as_str());
        self.api
            .call("createEgressFirewallRule", options.apply_to(builder))
            .await
    }

    pub async fn delete_egress_firewall_rule(&self, id: &str) -> Result<()> {
        self.delete("deleteEgressFirewallRule", id).await
    }

    pub async fn list_port_forwarding_rules(
        &self,
        options: &ListPortForwardingRulesOptions,
    ) -> Result<Vec<PortForwardingRule>> {
        self.list("listPortForwardingRules", PORT_FORWARDING_KEY, options)
            .await
    }

    pub async fn get_port_forwarding_rule(&self, id: &str) -> Result<Option<PortForwardingRule>> {
        self.get("listPortForwardingRules", PORT_FORWARDING_KEY, id).await
    }

    pub async fn create_port_forwarding_rule_for_virtual_machine(
        &self,
        ip_address_id: &str,
        protocol: PortForwardingProtocol,
        public_port: u16,
        virtual_machine_id: &str,
        private_port: u16,
        options: &CreatePortForwardingRuleOptions,
    ) -> Result<AsyncCreateResponse> {
        let builder = self
            .api
            .command("createPortForwardingRule")
            .add_query_param("ipaddressid", ip_address_id)
            .add_query_param("protocol", protocol.as_str())
            .add_query_param("publicport", public_port.to_string())
            .add_query_param("virtualmachineid", virtual_machine_id)
            .add_query_param("privateport", private_port.to_string());
        self.api
            .call("createPortForwardingRule", options.apply_to(builder))
            .await
    }

    pub async fn delete_port_forwarding_rule(&self, id: &str) -> Result<()> {
        self.delete("deletePortForwardingRule", id).await
    }

    async fn list<T, O>(&self, command: &str, key: &str, options: &O) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
        O: RequestOptions,
    {
        let builder = options.apply_to(self.api.list_command(command));
        self.api
            .call_list(command, key, builder)
            .await
            .empty_on_not_found()
    }

    async fn get<T>(&self, command: &str, key: &str, id: &str) -> Result<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let builder = self.api.list_command(command).add_query_param("id", id);
        Ok(self
            .api
            .call_named(command, key, builder)
            .await
            .null_on_not_found()?
            .flatten())
    }

    async fn delete(&self, command: &str, id: &str) -> Result<()> {
        let builder = self.api.command(command).add_query_param("id", id);
        self.api.call_void(builder).await.void_on_not_found()
    }
}
