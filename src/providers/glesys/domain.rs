//! GleSYS value types. Field names follow the lowercase wire keys of the
//! `format/json` answers.

use crate::core::json::{date, number_or_string, optional_date, string_or_number};
use crate::lenient_enum;
use crate::utils::error::Result;
use crate::utils::validation::check_argument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

lenient_enum! {
    pub enum ServerState {
        Running => "running",
        Locked => "locked",
        Stopped => "stopped",
    }
    fallback Unrecognized => "unrecognized";
}

/// `"yes"` / `"no"` flags, also accepted as JSON booleans.
mod yes_no {
    use super::*;
    use serde_json::Value;

    pub fn serialize<S>(value: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *value { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => b,
            Value::String(s) => s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("true"),
            Value::Number(n) => n.as_u64() == Some(1),
            _ => false,
        })
    }
}

/// Entry of `server/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    #[serde(rename = "serverid")]
    pub id: String,
    pub hostname: String,
    pub datacenter: String,
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cost {
    pub amount: f64,
    pub currency: String,
    #[serde(rename = "timeperiod")]
    pub time_period: String,
}

/// Address assigned to a server, as listed in its details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ip {
    #[serde(rename = "ipaddress")]
    pub ip: String,
    #[serde(with = "number_or_string")]
    pub version: u8,
    #[serde(with = "number_or_string")]
    pub cost: f64,
    pub currency: String,
}

impl Ip {
    pub fn is_v4(&self) -> bool {
        self.version == 4
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerDetails {
    #[serde(rename = "serverid")]
    pub id: String,
    pub hostname: String,
    pub datacenter: String,
    pub platform: String,
    #[serde(rename = "templatename")]
    pub template_name: String,
    pub description: Option<String>,
    #[serde(rename = "cpucores")]
    pub cpu_cores: u32,
    #[serde(rename = "memorysize")]
    pub memory_size_mb: u32,
    #[serde(rename = "disksize")]
    pub disk_size_gb: u32,
    #[serde(rename = "transfer")]
    pub transfer_gb: u32,
    pub state: Option<ServerState>,
    pub cost: Cost,
    #[serde(rename = "iplist")]
    pub ips: Vec<Ip>,
}

/// Hardware and placement of a server about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSpec {
    pub datacenter: String,
    pub platform: String,
    pub template_name: String,
    pub disk_size_gb: u32,
    pub memory_size_mb: u32,
    pub cpu_cores: u32,
    pub transfer_gb: u32,
}

impl ServerSpec {
    pub fn builder() -> ServerSpecBuilder {
        ServerSpecBuilder::default()
    }

    /// Form pairs in the order `server/create` expects them.
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("datacenter", self.datacenter.clone()),
            ("platform", self.platform.clone()),
            ("templatename", self.template_name.clone()),
            ("disksize", self.disk_size_gb.to_string()),
            ("memorysize", self.memory_size_mb.to_string()),
            ("cpucores", self.cpu_cores.to_string()),
            ("transfer", self.transfer_gb.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServerSpecBuilder {
    datacenter: Option<String>,
    platform: Option<String>,
    template_name: Option<String>,
    disk_size_gb: Option<u32>,
    memory_size_mb: Option<u32>,
    cpu_cores: Option<u32>,
    transfer_gb: Option<u32>,
}

impl ServerSpecBuilder {
    pub fn datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn template_name(mut self, template_name: impl Into<String>) -> Self {
        self.template_name = Some(template_name.into());
        self
    }

    pub fn disk_size_gb(mut self, disk_size_gb: u32) -> Self {
        self.disk_size_gb = Some(disk_size_gb);
        self
    }

    pub fn memory_size_mb(mut self, memory_size_mb: u32) -> Self {
        self.memory_size_mb = Some(memory_size_mb);
        self
    }

    pub fn cpu_cores(mut self, cpu_cores: u32) -> Self {
        self.cpu_cores = Some(cpu_cores);
        self
    }

    pub fn transfer_gb(mut self, transfer_gb: u32) -> Self {
        self.transfer_gb = Some(transfer_gb);
        self
    }

    pub fn build(self) -> Result<ServerSpec> {
        Ok(ServerSpec {
            datacenter: required_text("datacenter", self.datacenter)?,
            platform: required_text("platform", self.platform)?,
            template_name: required_text("templateName", self.template_name)?,
            disk_size_gb: required_size("diskSizeGB", self.disk_size_gb)?,
            memory_size_mb: required_size("memorySizeMB", self.memory_size_mb)?,
            cpu_cores: required_size("cpuCores", self.cpu_cores)?,
            transfer_gb: required_size("transferGB", self.transfer_gb)?,
        })
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String> {
    let value = value.unwrap_or_default();
    check_argument(!value.trim().is_empty(), || format!("{field} is required"))?;
    Ok(value)
}

fn required_size(field: &str, value: Option<u32>) -> Result<u32> {
    let value = value.unwrap_or_default();
    check_argument(value > 0, || format!("{field} must be positive"))?;
    Ok(value)
}

/// Values one create argument may take, with its price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowedArguments {
    #[serde(rename = "allowedvalues")]
    pub allowed_units: Vec<u32>,
    #[serde(rename = "units")]
    pub unit: Option<String>,
    #[serde(rename = "costperunit")]
    pub cost_per_unit: Cost,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowedArgumentsForCreateServer {
    #[serde(rename = "disksize")]
    pub disk_sizes: AllowedArguments,
    #[serde(rename = "memorysize")]
    pub memory_sizes: AllowedArguments,
    #[serde(rename = "cpucores")]
    pub cpu_cores: AllowedArguments,
    #[serde(rename = "template")]
    pub templates: Vec<String>,
    #[serde(rename = "transfer")]
    pub transfers: AllowedArguments,
    #[serde(rename = "datacenter")]
    pub data_centers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsTemplate {
    pub name: String,
    #[serde(rename = "minimumdisksize")]
    pub min_disk_size: u32,
    #[serde(rename = "minimummemorysize")]
    pub min_mem_size: u32,
    #[serde(rename = "operatingsystem")]
    pub os: String,
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceStatus {
    pub unit: String,
    #[serde(with = "number_or_string")]
    pub max: f64,
    #[serde(with = "number_or_string")]
    pub usage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerUptime {
    pub current: u64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerStatus {
    pub state: Option<ServerState>,
    pub cpu: Option<ResourceStatus>,
    pub memory: Option<ResourceStatus>,
    pub disk: Option<ResourceStatus>,
    pub uptime: Option<ServerUptime>,
}

/// VNC access to a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Console {
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub password: String,
}

/// One OpenVZ user bean counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerLimit {
    #[serde(with = "number_or_string")]
    pub held: u64,
    #[serde(rename = "maxheld", with = "number_or_string")]
    pub max_held: u64,
    #[serde(with = "number_or_string")]
    pub barrier: u64,
    #[serde(with = "number_or_string")]
    pub limit: u64,
    #[serde(rename = "failcnt", with = "number_or_string")]
    pub fail_count: u64,
}

pub type ServerLimits = BTreeMap<String, ServerLimit>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceUsageInfo {
    pub resource: String,
    pub resolution: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsageValue {
    #[serde(with = "number_or_string")]
    pub value: f64,
    #[serde(with = "date")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceUsage {
    pub info: ResourceUsageInfo,
    pub values: Vec<ResourceUsageValue>,
}

/// Address owned by the account, as `ip/listown` and `ip/details` answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpDetails {
    #[serde(rename = "ipaddress")]
    pub address: String,
    pub datacenter: String,
    #[serde(rename = "ipversion", with = "number_or_string")]
    pub version: u8,
    pub platform: Option<String>,
    #[serde(rename = "serverid")]
    pub server_id: Option<String>,
    #[serde(with = "yes_no")]
    pub reserved: bool,
    pub netmask: Option<String>,
    pub broadcast: Option<String>,
    pub gateway: Option<String>,
    #[serde(rename = "nameservers")]
    pub name_servers: Vec<String>,
    pub ptr: Option<String>,
    pub cost: Option<Cost>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    #[serde(rename = "domainname")]
    pub name: String,
    #[serde(rename = "createtime", with = "optional_date")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(rename = "recordcount")]
    pub record_count: u32,
    #[serde(rename = "usingglesysnameserver", with = "yes_no")]
    pub use_glesys_name_server: bool,
    #[serde(rename = "primarynameserver")]
    pub primary_name_server: Option<String>,
    #[serde(rename = "responsibleperson")]
    pub responsible_person: Option<String>,
    pub ttl: Option<u32>,
    pub refresh: Option<u32>,
    pub retry: Option<u32>,
    pub expire: Option<u32>,
    pub minimum: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainRecord {
    #[serde(rename = "recordid", with = "string_or_number")]
    pub id: String,
    #[serde(rename = "domainname")]
    pub domain: String,
    pub host: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub data: String,
    pub ttl: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailQuota {
    #[serde(with = "number_or_string")]
    pub max: u32,
    pub unit: String,
}

/// Mailbox as `email/list` and `email/createaccount` answer it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailAccount {
    #[serde(rename = "emailaccount")]
    pub account: String,
    pub quota: EmailQuota,
    #[serde(rename = "antispamlevel", with = "number_or_string")]
    pub antispam_level: u8,
    #[serde(rename = "antivirus", with = "yes_no")]
    pub anti_virus: bool,
    #[serde(rename = "autorespond", with = "yes_no")]
    pub auto_respond: bool,
    #[serde(rename = "autorespondmessage")]
    pub auto_respond_message: Option<String>,
    #[serde(rename = "autorespondsaveemail", with = "yes_no")]
    pub auto_respond_save_email: bool,
    #[serde(with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(with = "optional_date")]
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailAlias {
    #[serde(rename = "emailalias")]
    pub alias: String,
    #[serde(rename = "goto")]
    pub forward_to: String,
}

/// `email/list` answers accounts and aliases of a domain together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailList {
    #[serde(rename = "emailaccounts")]
    pub accounts: Vec<EmailAccount>,
    #[serde(rename = "emailaliases")]
    pub aliases: Vec<EmailAlias>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailOverviewSummary {
    pub accounts: u32,
    #[serde(rename = "maxaccounts")]
    pub max_accounts: u32,
    pub aliases: u32,
    #[serde(rename = "maxaliases")]
    pub max_aliases: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailOverviewDomain {
    #[serde(rename = "domainname")]
    pub domain: String,
    pub accounts: u32,
    pub aliases: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailOverview {
    pub summary: EmailOverviewSummary,
    pub domains: Vec<EmailOverviewDomain>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_server_spec_requires_every_field() {
        let spec = ServerSpec::builder()
            .datacenter("Falkenberg")
            .platform("OpenVZ")
            .template_name("Ubuntu 32-bit")
            .disk_size_gb(5)
            .memory_size_mb(512)
            .cpu_cores(1)
            .transfer_gb(50)
            .build()
            .unwrap();
        assert_eq!(spec.form_pairs()[2], ("templatename", "Ubuntu 32-bit".to_string()));

        let err = ServerSpec::builder()
            .datacenter("Falkenberg")
            .platform("OpenVZ")
            .disk_size_gb(5)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("templateName"));
    }

    #[test]
    fn test_server_details_from_json() {
        let details: ServerDetails = serde_json::from_value(json!({
            "serverid": "vz1840356",
            "hostname": "glesys-s",
            "datacenter": "Falkenberg",
            "platform": "OpenVZ",
            "templatename": "Ubuntu 10.04 LTS 32-bit",
            "cpucores": 1,
            "memorysize": 512,
            "disksize": 5,
            "transfer": 50,
            "state": "running",
            "cost": {"amount": 10.22, "currency": "EUR", "timeperiod": "month"},
            "iplist": [{"ipaddress": "31.192.231.254", "version": 4, "cost": 2, "currency": "EUR"}]
        }))
        .unwrap();
        assert_eq!(details.state, Some(ServerState::Running));
        assert_eq!(details.cost.amount, 10.22);
        assert!(details.ips[0].is_v4());
        assert_eq!(details.ips[0].cost, 2.0);
    }

    #[test]
    fn test_domain_flags_and_dates() {
        let domain: Domain = serde_json::from_value(json!({
            "domainname": "testglesys.example.org",
            "createtime": "2012-01-31 12:19:03",
            "recordcount": 9,
            "usingglesysnameserver": "no"
        }))
        .unwrap();
        assert!(!domain.use_glesys_name_server);
        assert_eq!(
            domain.create_time,
            Some(Utc.with_ymd_and_hms(2012, 1, 31, 12, 19, 3).unwrap())
        );
    }

    #[test]
    fn test_email_account_flags_and_quota() {
        let account: EmailAccount = serde_json::from_value(json!({
            "emailaccount": "test@example.org",
            "quota": {"max": "200", "unit": "MB"},
            "antispamlevel": 3,
            "antivirus": "yes",
            "autorespond": "no",
            "autorespondsaveemail": "yes",
            "created": "2012-06-20T12:01:01+02:00",
            "modified": null
        }))
        .unwrap();
        assert_eq!(account.quota.max, 200);
        assert!(account.anti_virus);
        assert!(!account.auto_respond);
        assert!(account.auto_respond_save_email);
        assert_eq!(
            account.created,
            Some(Utc.with_ymd_and_hms(2012, 6, 20, 10, 1, 1).unwrap())
        );
        assert_eq!(account.modified, None);
    }

    #[test]
    fn test_unknown_state_is_unrecognized() {
        let status: ServerStatus = serde_json::from_value(json!({"state": "migrating"})).unwrap();
        assert_eq!(status.state, Some(ServerState::Unrecognized));
    }
}
