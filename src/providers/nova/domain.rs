use crate::core::json::{optional_date, optional_string_or_number, string_or_number};
use crate::lenient_enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub rel: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub href: String,
}

/// Anything that has an id, a name and links to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub links: Vec<Link>,
}

impl Resource {
    pub fn self_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel.as_deref() == Some("self"))
            .map(|link| link.href.as_str())
    }
}

lenient_enum! {
    pub enum ServerStatus {
        Active => "ACTIVE",
        Build => "BUILD",
        Rebuild => "REBUILD",
        Suspended => "SUSPENDED",
        Paused => "PAUSED",
        Resize => "RESIZE",
        VerifyResize => "VERIFY_RESIZE",
        RevertResize => "REVERT_RESIZE",
        Password => "PASSWORD",
        Reboot => "REBOOT",
        HardReboot => "HARD_REBOOT",
        Deleted => "DELETED",
        Unknown => "UNKNOWN",
        Error => "ERROR",
        Shutoff => "SHUTOFF",
    }
    fallback Unrecognized => "UNRECOGNIZED";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub addr: String,
    pub version: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub links: Vec<Link>,
    pub uuid: Option<String>,
    pub tenant_id: Option<String>,
    pub user_id: Option<String>,
    #[serde(with = "optional_date")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "hostId")]
    pub host_id: Option<String>,
    #[serde(rename = "accessIPv4")]
    pub access_ipv4: Option<String>,
    #[serde(rename = "accessIPv6")]
    pub access_ipv6: Option<String>,
    pub status: ServerStatus,
    pub image: Option<Resource>,
    pub flavor: Option<Resource>,
    pub key_name: Option<String>,
    pub config_drive: Option<String>,
    /// Network label to the addresses the server holds on it.
    pub addresses: BTreeMap<String, Vec<Address>>,
    pub metadata: BTreeMap<String, String>,
    #[serde(rename = "OS-EXT-STS:task_state")]
    pub task_state: Option<String>,
    #[serde(rename = "OS-EXT-STS:vm_state")]
    pub vm_state: Option<String>,
    #[serde(rename = "OS-EXT-STS:power_state")]
    pub power_state: Option<i32>,
    #[serde(rename = "OS-EXT-SRV-ATTR:instance_name")]
    pub instance_name: Option<String>,
    #[serde(rename = "OS-EXT-SRV-ATTR:host")]
    pub host_name: Option<String>,
    #[serde(rename = "OS-EXT-SRV-ATTR:hypervisor_hostname")]
    pub hypervisor_host_name: Option<String>,
    #[serde(rename = "OS-DCF:diskConfig")]
    pub disk_config: Option<String>,
}

impl Server {
    pub fn addresses_on(&self, network: &str) -> &[Address] {
        self.addresses.get(network).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Answer to a create: only the id, links and generated admin password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerCreated {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub links: Vec<Link>,
    #[serde(rename = "adminPass")]
    pub admin_pass: Option<String>,
    #[serde(rename = "OS-DCF:diskConfig")]
    pub disk_config: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebootType {
    Hard,
    Soft,
}

impl RebootType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RebootType::Hard => "HARD",
            RebootType::Soft => "SOFT",
        }
    }
}

lenient_enum! {
    pub enum ImageStatus {
        Unknown => "UNKNOWN",
        Active => "ACTIVE",
        Saving => "SAVING",
        Error => "ERROR",
        Deleted => "DELETED",
    }
    fallback Unrecognized => "UNRECOGNIZED";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub links: Vec<Link>,
    #[serde(with = "optional_date")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    pub tenant_id: Option<String>,
    pub user_id: Option<String>,
    pub status: ImageStatus,
    pub progress: u32,
    #[serde(rename = "minDisk")]
    pub min_disk: u32,
    #[serde(rename = "minRam")]
    pub min_ram: u32,
    pub server: Option<Resource>,
    pub metadata: BTreeMap<String, String>,
}

lenient_enum! {
    pub enum VolumeStatus {
        Creating => "creating",
        Available => "available",
        InUse => "in-use",
        Deleting => "deleting",
        Error => "error",
    }
    fallback Unrecognized => "unrecognized";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeAttachment {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(rename = "volumeId", with = "string_or_number")]
    pub volume_id: String,
    #[serde(rename = "serverId", with = "optional_string_or_number")]
    pub server_id: Option<String>,
    pub device: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub status: VolumeStatus,
    pub size: u32,
    #[serde(rename = "availabilityZone")]
    pub zone: Option<String>,
    #[serde(rename = "createdAt", with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    pub attachments: Vec<VolumeAttachment>,
    #[serde(rename = "volumeType")]
    pub volume_type: Option<String>,
    #[serde(rename = "snapshotId", with = "optional_string_or_number")]
    pub snapshot_id: Option<String>,
    #[serde(rename = "displayName")]
    pub name: Option<String>,
    #[serde(rename = "displayDescription")]
    pub description: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeSnapshot {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(rename = "volumeId", with = "string_or_number")]
    pub volume_id: String,
    pub status: VolumeStatus,
    pub size: u32,
    #[serde(rename = "createdAt", with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "displayName")]
    pub name: Option<String>,
    #[serde(rename = "displayDescription")]
    pub description: Option<String>,
}

lenient_enum! {
    pub enum IpProtocol {
        Tcp => "tcp",
        Udp => "udp",
        Icmp => "icmp",
    }
    fallback Unrecognized => "unrecognized";
}

/// Source group of a rule, named by owning tenant and group name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantIdGroupName {
    pub tenant_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpRange {
    pub cidr: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityGroupRule {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub ip_protocol: IpProtocol,
    pub from_port: i32,
    pub to_port: i32,
    #[serde(with = "string_or_number")]
    pub parent_group_id: String,
    pub ip_range: IpRange,
    pub group: Option<TenantIdGroupName>,
}

impl SecurityGroupRule {
    pub fn cidr(&self) -> Option<&str> {
        self.ip_range.cidr.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityGroup {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub tenant_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub rules: Vec<SecurityGroupRule>,
}

/// Protocol and port range of a new rule; the source is given separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngressRule {
    pub ip_protocol: IpProtocol,
    pub from_port: u16,
    pub to_port: u16,
}

impl IngressRule {
    pub fn new(ip_protocol: IpProtocol, from_port: u16, to_port: u16) -> Self {
        Self {
            ip_protocol,
            from_port,
            to_port,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupType {
    Daily,
    Weekly,
}

impl BackupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupType::Daily => "daily",
            BackupType::Weekly => "weekly",
        }
    }
}

/// Service running on a host, as `os-hosts` lists it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Host {
    #[serde(rename = "host_name")]
    pub name: String,
    pub service: String,
}

/// One row of `os-hosts/{host}`: totals, current use or use per project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostResourceUsage {
    pub host: String,
    pub project: String,
    pub memory_mb: u64,
    pub cpu: u32,
    pub disk_gb: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeType {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "created_at", with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "updated_at", with = "optional_date")]
    pub updated: Option<DateTime<Utc>>,
    pub extra_specs: BTreeMap<String, String>,
}
