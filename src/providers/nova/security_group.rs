use super::domain::{IngressRule, SecurityGroup, SecurityGroupRule};
use super::options::json_payload;
use super::{Accept, ZoneClient};
use crate::core::fallback::Fallback;
use crate::utils::error::Result;
use reqwest::Method;
use serde_json::{json, Map, Value};

const GROUPS: &str = "os-security-groups";
const RULES: &str = "os-security-group-rules";

#[derive(Debug, Clone)]
pub struct SecurityGroupApi {
    zone: ZoneClient,
}

impl SecurityGroupApi {
    pub(crate) fn new(zone: ZoneClient) -> Self {
        Self { zone }
    }

    pub async fn list(&self) -> Result<Vec<SecurityGroup>> {
        let builder = self.zone.get(&[GROUPS])?;
        self.zone
            .fetch(builder, "security_groups")
            .await
            .empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<SecurityGroup>> {
        let builder = self.zone.get(&[GROUPS, id])?;
        self.zone
            .fetch(builder, "security_group")
            .await
            .null_on_not_found()
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<SecurityGroup> {
        let builder = self
            .zone
            .request(Method::POST, &[GROUPS], Accept::Json)?
            .payload(json_payload(
                json!({"security_group": {"name": name, "description": description}}),
            ));
        self.zone.fetch(builder, "security_group").await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let builder = self
            .zone
            .request(Method::DELETE, &[GROUPS, id], Accept::Json)?;
        self.zone.send_void(builder).await.false_on_not_found()
    }

    /// Opens `rule` to traffic from `cidr`.
    pub async fn create_rule_allowing_cidr(
        &self,
        parent_group_id: &str,
        rule: IngressRule,
        cidr: &str,
    ) -> Result<SecurityGroupRule> {
        let mut body = Map::new();
        body.insert("parent_group_id".into(), json!(parent_group_id));
        body.insert("cidr".into(), json!(cidr));
        self.create_rule(rule, body).await
    }

    /// Opens `rule` to traffic from members of `group_id`.
    pub async fn create_rule_allowing_security_group(
        &self,
        parent_group_id: &str,
        rule: IngressRule,
        group_id: &str,
    ) -> Result<SecurityGroupRule> {
        let mut body = Map::new();
        body.insert("group_id".into(), json!(group_id));
        body.insert("parent_group_id".into(), json!(parent_group_id));
        self.create_rule(rule, body).await
    }

    pub async fn delete_rule(&self, id: &str) -> Result<bool> {
        let builder = self
            .zone
            .request(Method::DELETE, &[RULES, id], Accept::Any)?;
        self.zone.send_void(builder).await.false_on_not_found()
    }

    async fn create_rule(&self, rule: IngressRule, mut body: Map<String, Value>) -> Result<SecurityGroupRule> {
        // ports travel as strings
        body.insert("ip_protocol".into(), json!(rule.ip_protocol.as_str()));
        body.insert("from_port".into(), json!(rule.from_port.to_string()));
        body.insert("to_port".into(), json!(rule.to_port.to_string()));
        let builder = self
            .zone
            .request(Method::POST, &[RULES], Accept::Json)?
            .payload(json_payload(json!({ "security_group_rule": body })));
        self.zone.fetch(builder, "security_group_rule").await
    }
}
