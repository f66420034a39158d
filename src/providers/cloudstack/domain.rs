use crate::core::json::{
    comma_separated, number_or_string, optional_date, optional_string_or_number, string_or_number,
};
use crate::lenient_enum;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

lenient_enum! {
    pub enum VirtualMachineState {
        Starting => "Starting",
        Running => "Running",
        Stopping => "Stopping",
        Stopped => "Stopped",
        Destroyed => "Destroyed",
        Expunging => "Expunging",
        Migrating => "Migrating",
        Error => "Error",
        Unknown => "Unknown",
        Shutdowned => "Shutdowned",
    }
    fallback Unrecognized => "UNRECOGNIZED";
}

static CPU_USED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9.|,\-]+%$").expect("cpuused pattern is valid"));

/// `cpuused` is a percentage such as `"0.42%"` or `"1,5%"`.
fn cpu_used<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    if let Some(raw) = &value {
        if !CPU_USED.is_match(raw) {
            return Err(serde::de::Error::custom(format!(
                "cpuused must be a percentage, got {raw}"
            )));
        }
    }
    Ok(value)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nic {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(rename = "networkid", with = "optional_string_or_number")]
    pub network_id: Option<String>,
    pub netmask: Option<String>,
    pub gateway: Option<String>,
    #[serde(rename = "ipaddress")]
    pub ip_address: Option<String>,
    #[serde(rename = "isolationuri")]
    pub isolation_uri: Option<String>,
    #[serde(rename = "broadcasturi")]
    pub broadcast_uri: Option<String>,
    #[serde(rename = "traffictype")]
    pub traffic_type: Option<String>,
    #[serde(rename = "type")]
    pub guest_ip_type: Option<String>,
    #[serde(rename = "isdefault")]
    pub is_default: bool,
    #[serde(rename = "macaddress")]
    pub mac_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmSecurityGroup {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualMachine {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub account: Option<String>,
    #[serde(rename = "cpunumber")]
    pub cpu_count: u64,
    #[serde(rename = "cpuspeed")]
    pub cpu_speed: u64,
    #[serde(rename = "cpuused", deserialize_with = "cpu_used")]
    pub cpu_used: Option<String>,
    #[serde(rename = "displayname")]
    pub display_name: Option<String>,
    #[serde(with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    pub domain: Option<String>,
    #[serde(rename = "domainid", with = "optional_string_or_number")]
    pub domain_id: Option<String>,
    #[serde(rename = "forvirtualnetwork")]
    pub uses_virtual_network: bool,
    pub group: Option<String>,
    #[serde(rename = "groupid", with = "optional_string_or_number")]
    pub group_id: Option<String>,
    #[serde(rename = "guestosid", with = "optional_string_or_number")]
    pub guest_os_id: Option<String>,
    #[serde(rename = "haenable")]
    pub ha_enabled: bool,
    #[serde(rename = "hostid", with = "optional_string_or_number")]
    pub host_id: Option<String>,
    pub hostname: Option<String>,
    #[serde(rename = "ipaddress")]
    pub ip_address: Option<String>,
    #[serde(rename = "isodisplaytext")]
    pub iso_display_text: Option<String>,
    #[serde(rename = "isoid", with = "optional_string_or_number")]
    pub iso_id: Option<String>,
    #[serde(rename = "isoname")]
    pub iso_name: Option<String>,
    #[serde(rename = "jobid", with = "optional_string_or_number")]
    pub job_id: Option<String>,
    #[serde(rename = "jobstatus")]
    pub job_status: Option<i32>,
    pub memory: u64,
    pub name: Option<String>,
    #[serde(rename = "networkkbsread")]
    pub network_kbs_read: Option<u64>,
    #[serde(rename = "networkkbswrite")]
    pub network_kbs_write: Option<u64>,
    pub password: Option<String>,
    #[serde(rename = "passwordenabled")]
    pub password_enabled: bool,
    #[serde(rename = "publicip")]
    pub public_ip: Option<String>,
    #[serde(rename = "publicipid", with = "optional_string_or_number")]
    pub public_ip_id: Option<String>,
    #[serde(rename = "rootdeviceid", with = "optional_string_or_number")]
    pub root_device_id: Option<String>,
    #[serde(rename = "rootdevicetype")]
    pub root_device_type: Option<String>,
    #[serde(rename = "serviceofferingid", with = "optional_string_or_number")]
    pub service_offering_id: Option<String>,
    #[serde(rename = "serviceofferingname")]
    pub service_offering_name: Option<String>,
    pub state: VirtualMachineState,
    #[serde(rename = "templatedisplaytext")]
    pub template_display_text: Option<String>,
    #[serde(rename = "templateid", with = "optional_string_or_number")]
    pub template_id: Option<String>,
    #[serde(rename = "templatename")]
    pub template_name: Option<String>,
    #[serde(rename = "zoneid", with = "optional_string_or_number")]
    pub zone_id: Option<String>,
    #[serde(rename = "zonename")]
    pub zone_name: Option<String>,
    #[serde(rename = "nic")]
    pub nics: Vec<Nic>,
    pub hypervisor: Option<String>,
    #[serde(rename = "securitygroup")]
    pub security_groups: Vec<VmSecurityGroup>,
}

/// Download/upload status. CloudStack reports it as free text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TemplateStatus {
    Unknown,
    Abandoned,
    DownloadError,
    NotDownloaded,
    DownloadInProgress,
    Downloaded,
    Uploaded,
    NotUploaded,
    UploadError,
    UploadInProgress,
    #[default]
    Unrecognized,
}

impl TemplateStatus {
    const NAMED: [(&'static str, TemplateStatus); 10] = [
        ("UNKNOWN", TemplateStatus::Unknown),
        ("ABANDONED", TemplateStatus::Abandoned),
        ("DOWNLOAD_ERROR", TemplateStatus::DownloadError),
        ("NOT_DOWNLOADED", TemplateStatus::NotDownloaded),
        ("DOWNLOAD_IN_PROGRESS", TemplateStatus::DownloadInProgress),
        ("DOWNLOADED", TemplateStatus::Downloaded),
        ("UPLOADED", TemplateStatus::Uploaded),
        ("NOT_UPLOADED", TemplateStatus::NotUploaded),
        ("UPLOAD_ERROR", TemplateStatus::UploadError),
        ("UPLOAD_IN_PROGRESS", TemplateStatus::UploadInProgress),
    ];

    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            "" => TemplateStatus::Unknown,
            "Processing" | "Installing Template" | "Installing ISO" => {
                TemplateStatus::DownloadInProgress
            }
            s if s.ends_with("% Downloaded") => TemplateStatus::DownloadInProgress,
            "Download Complete" => TemplateStatus::Downloaded,
            s => Self::NAMED
                .iter()
                .find(|(name, _)| *name == s)
                .map(|(_, status)| *status)
                .unwrap_or(TemplateStatus::Unrecognized),
        }
    }

    pub fn as_str(&self) -> &'static str {
        Self::NAMED
            .iter()
            .find(|(_, status)| status == self)
            .map(|(name, _)| *name)
            .unwrap_or("UNRECOGNIZED")
    }
}

impl fmt::Display for TemplateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TemplateStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TemplateStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_value(raw.as_deref().unwrap_or_default()))
    }
}

lenient_enum! {
    pub enum TemplateType {
        User => "USER",
        Builtin => "BUILTIN",
        System => "SYSTEM",
    }
    fallback Unrecognized => "UNRECOGNIZED";
}

lenient_enum! {
    pub enum TemplateFormat {
        Vhd => "VHD",
        Qcow2 => "QCOW2",
        Ova => "OVA",
    }
    fallback Unrecognized => "UNRECOGNIZED";
}

lenient_enum! {
    pub enum ExtractMode {
        HttpDownload => "HTTP_DOWNLOAD",
        FtpUpload => "FTP_UPLOAD",
    }
    fallback Unrecognized => "UNRECOGNIZED";
}

/// Which templates `listTemplates` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplateFilter {
    Featured,
    SelfOwned,
    SelfExecutable,
    #[default]
    Executable,
    Community,
}

impl TemplateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateFilter::Featured => "featured",
            TemplateFilter::SelfOwned => "self",
            TemplateFilter::SelfExecutable => "selfexecutable",
            TemplateFilter::Executable => "executable",
            TemplateFilter::Community => "community",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(rename = "displaytext")]
    pub display_text: Option<String>,
    pub domain: Option<String>,
    #[serde(rename = "domainid", with = "optional_string_or_number")]
    pub domain_id: Option<String>,
    pub account: Option<String>,
    #[serde(rename = "accountid", with = "optional_string_or_number")]
    pub account_id: Option<String>,
    #[serde(rename = "zonename")]
    pub zone: Option<String>,
    #[serde(rename = "zoneid", with = "optional_string_or_number")]
    pub zone_id: Option<String>,
    #[serde(rename = "ostypename")]
    pub os_type: Option<String>,
    #[serde(rename = "ostypeid", with = "optional_string_or_number")]
    pub os_type_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "templatetype")]
    pub template_type: TemplateType,
    pub status: TemplateStatus,
    pub format: TemplateFormat,
    pub hypervisor: Option<String>,
    pub size: Option<u64>,
    #[serde(with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(with = "optional_date")]
    pub removed: Option<DateTime<Utc>>,
    #[serde(rename = "crossZones")]
    pub cross_zones: bool,
    pub bootable: bool,
    #[serde(rename = "isextractable")]
    pub extractable: bool,
    #[serde(rename = "isfeatured")]
    pub featured: bool,
    #[serde(rename = "ispublic")]
    pub is_public: bool,
    #[serde(rename = "isready")]
    pub ready: bool,
    #[serde(rename = "passwordenabled")]
    pub password_enabled: bool,
    #[serde(rename = "jobid", with = "optional_string_or_number")]
    pub job_id: Option<String>,
    #[serde(rename = "jobstatus", with = "optional_string_or_number")]
    pub job_status: Option<String>,
    pub checksum: Option<String>,
    #[serde(rename = "hostId", with = "optional_string_or_number")]
    pub host_id: Option<String>,
    #[serde(rename = "hostName")]
    pub host_name: Option<String>,
    #[serde(rename = "sourcetemplateid", with = "optional_string_or_number")]
    pub source_template_id: Option<String>,
    #[serde(rename = "templatetag")]
    pub template_tag: Option<String>,
}

/// Name, OS type and description shared by createTemplate and registerTemplate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMetadata {
    pub name: String,
    pub os_type_id: String,
    pub display_text: String,
}

impl TemplateMetadata {
    pub fn new(
        name: impl Into<String>,
        os_type_id: impl Into<String>,
        display_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            os_type_id: os_type_id.into(),
            display_text: display_text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatePermission {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub account: BTreeSet<String>,
    #[serde(rename = "domainid", with = "optional_string_or_number")]
    pub domain_id: Option<String>,
    #[serde(rename = "ispublic")]
    pub is_public: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateExtraction {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(rename = "accountid", with = "optional_string_or_number")]
    pub account_id: Option<String>,
    #[serde(with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "extractId", with = "optional_string_or_number")]
    pub extract_id: Option<String>,
    #[serde(rename = "extractMode")]
    pub extract_mode: ExtractMode,
    pub name: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "storagetype")]
    pub storage_type: Option<String>,
    #[serde(rename = "uploadpercentage")]
    pub upload_percentage: u32,
    pub url: Option<String>,
    #[serde(rename = "zoneid", with = "optional_string_or_number")]
    pub zone_id: Option<String>,
    #[serde(rename = "zonename")]
    pub zone_name: Option<String>,
}

lenient_enum! {
    pub enum FirewallProtocol {
        Tcp => "TCP",
        Udp => "UDP",
        Icmp => "ICMP",
    }
    fallback Unknown => "UNKNOWN";
}

lenient_enum! {
    /// Port forwarding rules take the protocol in lower case.
    pub enum PortForwardingProtocol {
        Tcp => "tcp",
        Udp => "udp",
        Icmp => "icmp",
    }
    fallback Unknown => "unknown";
}

lenient_enum! {
    /// Shared by firewall and port forwarding rules.
    pub enum RuleState {
        Staged => "Staged",
        Add => "Add",
        Active => "Active",
        Deleting => "Deleting",
    }
    fallback Unknown => "Unknown";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallRule {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub protocol: FirewallProtocol,
    #[serde(rename = "startport", with = "number_or_string")]
    pub start_port: u32,
    #[serde(rename = "endport", with = "number_or_string")]
    pub end_port: u32,
    #[serde(rename = "ipaddressid", with = "optional_string_or_number")]
    pub ip_address_id: Option<String>,
    #[serde(rename = "ipaddress")]
    pub ip_address: Option<String>,
    pub state: RuleState,
    #[serde(rename = "cidrlist", with = "comma_separated")]
    pub cidrs: BTreeSet<String>,
    #[serde(rename = "icmpcode")]
    pub icmp_code: Option<i32>,
    #[serde(rename = "icmptype")]
    pub icmp_type: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortForwardingRule {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(rename = "ipaddress")]
    pub ip_address: Option<String>,
    #[serde(rename = "ipaddressid", with = "optional_string_or_number")]
    pub ip_address_id: Option<String>,
    #[serde(rename = "privateport", with = "number_or_string")]
    pub private_port: u32,
    pub protocol: PortForwardingProtocol,
    #[serde(rename = "publicport", with = "number_or_string")]
    pub public_port: u32,
    pub state: RuleState,
    #[serde(rename = "virtualmachinedisplayname")]
    pub virtual_machine_display_name: Option<String>,
    #[serde(rename = "virtualmachineid", with = "optional_string_or_number")]
    pub virtual_machine_id: Option<String>,
    #[serde(rename = "virtualmachinename")]
    pub virtual_machine_name: Option<String>,
    #[serde(rename = "cidrlist", with = "comma_separated")]
    pub cidrs: BTreeSet<String>,
    #[serde(rename = "privateendport", with = "number_or_string")]
    pub private_end_port: u32,
    #[serde(rename = "publicendport", with = "number_or_string")]
    pub public_end_port: u32,
}

lenient_enum! {
    pub enum AddressState {
        Allocating => "Allocating",
        Allocated => "Allocated",
        Releasing => "Releasing",
    }
    fallback Unrecognized => "UNRECOGNIZED";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicIPAddress {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub account: Option<String>,
    #[serde(with = "optional_date")]
    pub allocated: Option<DateTime<Utc>>,
    #[serde(rename = "associatednetworkid", with = "optional_string_or_number")]
    pub associated_network_id: Option<String>,
    pub domain: Option<String>,
    #[serde(rename = "domainid", with = "optional_string_or_number")]
    pub domain_id: Option<String>,
    #[serde(rename = "forvirtualnetwork")]
    pub uses_virtual_network: bool,
    #[serde(rename = "ipaddress")]
    pub ip_address: Option<String>,
    #[serde(rename = "issourcenat")]
    pub is_source_nat: bool,
    #[serde(rename = "isstaticnat")]
    pub is_static_nat: bool,
    #[serde(rename = "networkid", with = "optional_string_or_number")]
    pub network_id: Option<String>,
    pub state: AddressState,
    #[serde(rename = "virtualmachinedisplayname")]
    pub virtual_machine_display_name: Option<String>,
    #[serde(rename = "virtualmachineid", with = "optional_string_or_number")]
    pub virtual_machine_id: Option<String>,
    #[serde(rename = "virtualmachinename")]
    pub virtual_machine_name: Option<String>,
    #[serde(rename = "vlanid", alias = "VLANid", with = "optional_string_or_number")]
    pub vlan_id: Option<String>,
    #[serde(rename = "vlanname", alias = "VLANname")]
    pub vlan_name: Option<String>,
    #[serde(rename = "zoneid", with = "optional_string_or_number")]
    pub zone_id: Option<String>,
    #[serde(rename = "zonename")]
    pub zone_name: Option<String>,
    #[serde(rename = "jobid", with = "optional_string_or_number")]
    pub job_id: Option<String>,
    #[serde(rename = "jobstatus")]
    pub job_status: Option<i32>,
}

lenient_enum! {
    pub enum VolumeState {
        Allocated => "Allocated",
        Creating => "Creating",
        Ready => "Ready",
        Destroyed => "Destroyed",
        Failed => "Failed",
    }
    fallback Unrecognized => "UNRECOGNIZED";
}

lenient_enum! {
    /// Older releases send the numeric code.
    pub enum VolumeType {
        Root => "ROOT" | "0",
        DataDisk => "DATADISK" | "1",
    }
    fallback Unrecognized => "UNRECOGNIZED";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub account: Option<String>,
    #[serde(with = "optional_date")]
    pub attached: Option<DateTime<Utc>>,
    #[serde(with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    pub destroyed: bool,
    #[serde(rename = "deviceid", with = "optional_string_or_number")]
    pub device_id: Option<String>,
    #[serde(rename = "diskofferingdisplaytext")]
    pub disk_offering_display_text: Option<String>,
    #[serde(rename = "diskofferingid", with = "optional_string_or_number")]
    pub disk_offering_id: Option<String>,
    #[serde(rename = "diskofferingname")]
    pub disk_offering_name: Option<String>,
    pub domain: Option<String>,
    #[serde(rename = "domainid", with = "optional_string_or_number")]
    pub domain_id: Option<String>,
    pub hypervisor: Option<String>,
    #[serde(rename = "isextractable")]
    pub extractable: bool,
    #[serde(rename = "jobid", with = "optional_string_or_number")]
    pub job_id: Option<String>,
    #[serde(rename = "jobstatus", with = "optional_string_or_number")]
    pub job_status: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "serviceofferingdisplaytext")]
    pub service_offering_display_text: Option<String>,
    #[serde(rename = "serviceofferingid", with = "optional_string_or_number")]
    pub service_offering_id: Option<String>,
    #[serde(rename = "serviceofferingname")]
    pub service_offering_name: Option<String>,
    pub size: u64,
    #[serde(rename = "snapshotid", with = "optional_string_or_number")]
    pub snapshot_id: Option<String>,
    pub state: VolumeState,
    pub storage: Option<String>,
    #[serde(rename = "storagetype")]
    pub storage_type: Option<String>,
    #[serde(rename = "type")]
    pub volume_type: VolumeType,
    #[serde(rename = "virtualmachineid", with = "optional_string_or_number")]
    pub virtual_machine_id: Option<String>,
    #[serde(rename = "vmdisplayname")]
    pub vm_display_name: Option<String>,
    #[serde(rename = "vmname")]
    pub vm_name: Option<String>,
    #[serde(rename = "vmstate")]
    pub vm_state: Option<VirtualMachineState>,
    #[serde(rename = "zoneid", with = "optional_string_or_number")]
    pub zone_id: Option<String>,
    #[serde(rename = "zonename")]
    pub zone_name: Option<String>,
}

/// Answer of a create command that runs asynchronously.
/// One ingress permission of a security group: either a CIDR or another
/// account's group, over a port range or an ICMP type/code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngressRule {
    #[serde(rename = "ruleid", with = "string_or_number")]
    pub id: String,
    pub account: Option<String>,
    #[serde(rename = "securitygroupname")]
    pub security_group_name: Option<String>,
    pub cidr: Option<String>,
    pub protocol: Option<String>,
    #[serde(rename = "startport")]
    pub start_port: Option<u16>,
    #[serde(rename = "endport")]
    pub end_port: Option<u16>,
    #[serde(rename = "icmpcode")]
    pub icmp_code: Option<i32>,
    #[serde(rename = "icmptype")]
    pub icmp_type: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityGroup {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub account: Option<String>,
    pub domain: Option<String>,
    #[serde(rename = "domainid", with = "optional_string_or_number")]
    pub domain_id: Option<String>,
    pub project: Option<String>,
    #[serde(rename = "projectid", with = "optional_string_or_number")]
    pub project_id: Option<String>,
    #[serde(rename = "jobid", with = "optional_string_or_number")]
    pub job_id: Option<String>,
    #[serde(rename = "jobstatus", with = "optional_string_or_number")]
    pub job_status: Option<String>,
    #[serde(rename = "ingressrule")]
    pub ingress_rules: Vec<IngressRule>,
}

lenient_enum! {
    /// Which ISOs `listIsos` returns.
    pub enum ISOFilter {
        Featured => "featured",
        SelfOwned => "self",
        SelfExecutable => "selfexecutable" | "self_executable",
        Executable => "executable",
        Community => "community",
    }
    fallback Unrecognized => "UNRECOGNIZED";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Iso {
    #[serde(with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "displaytext")]
    pub display_text: Option<String>,
    pub account: Option<String>,
    #[serde(rename = "accountid", with = "optional_string_or_number")]
    pub account_id: Option<String>,
    pub domain: Option<String>,
    #[serde(rename = "domainid", with = "optional_string_or_number")]
    pub domain_id: Option<String>,
    #[serde(rename = "zonename")]
    pub zone: Option<String>,
    #[serde(rename = "zoneid", with = "optional_string_or_number")]
    pub zone_id: Option<String>,
    #[serde(rename = "ostypename")]
    pub os_type: Option<String>,
    #[serde(rename = "ostypeid", with = "optional_string_or_number")]
    pub os_type_id: Option<String>,
    #[serde(rename = "hostid", with = "optional_string_or_number")]
    pub host_id: Option<String>,
    #[serde(rename = "hostname")]
    pub host_name: Option<String>,
    pub hypervisor: Option<String>,
    pub format: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "templatetype")]
    pub template_type: Option<String>,
    #[serde(rename = "templatetag")]
    pub template_tag: Option<String>,
    #[serde(rename = "sourcetemplateid", with = "optional_string_or_number")]
    pub source_template_id: Option<String>,
    pub checksum: Option<String>,
    pub size: Option<u64>,
    #[serde(with = "optional_date")]
    pub created: Option<DateTime<Utc>>,
    #[serde(with = "optional_date")]
    pub removed: Option<DateTime<Utc>>,
    #[serde(rename = "crossZones")]
    pub cross_zones: bool,
    pub bootable: bool,
    #[serde(rename = "isextractable")]
    pub extractable: bool,
    #[serde(rename = "isfeatured")]
    pub featured: bool,
    #[serde(rename = "ispublic")]
    pub is_public: bool,
    #[serde(rename = "isready")]
    pub ready: bool,
    #[serde(rename = "passwordenabled")]
    pub password_enabled: bool,
    #[serde(rename = "jobid", with = "optional_string_or_number")]
    pub job_id: Option<String>,
    #[serde(rename = "jobstatus", with = "optional_string_or_number")]
    pub job_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsyncCreateResponse {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(rename = "jobid", with = "string_or_number")]
    pub job_id: String,
}

/// Answer of any other asynchronous command: only the job to poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsyncJobResponse {
    #[serde(rename = "jobid", with = "string_or_number")]
    pub job_id: String,
}
