//! Query-parameter options for the CloudStack commands.

use super::domain::{ISOFilter, TemplateFilter, TemplateFormat, VirtualMachineState, VolumeType};
use crate::core::options::{join_comma, BaseOptions};
use crate::request_options;
use crate::utils::error::Result;
use crate::utils::validation::check_argument;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// `account` + `domainid` scoping shared by most list and create commands.
pub trait AccountInDomain: Sized {
    fn base_mut(&mut self) -> &mut BaseOptions;

    fn account_in_domain(mut self, account: &str, domain_id: &str) -> Self {
        let base = self.base_mut();
        base.replace_query("account", account);
        base.replace_query("domainid", domain_id);
        self
    }

    fn domain_id(mut self, domain_id: &str) -> Self {
        self.base_mut().replace_query("domainid", domain_id);
        self
    }
}

macro_rules! account_in_domain {
    ($($name:ident),+ $(,)?) => {
        $(
            impl AccountInDomain for $name {
                fn base_mut(&mut self) -> &mut BaseOptions {
                    &mut self.base
                }
            }
        )+
    };
}

request_options! {
    pub struct AccountInDomainOptions;
    pub struct DeployVirtualMachineOptions;
    pub struct ListVirtualMachinesOptions;
    pub struct StopVirtualMachineOptions;
    pub struct CreateTemplateOptions;
    pub struct RegisterTemplateOptions;
    pub struct UpdateTemplateOptions;
    pub struct DeleteTemplateOptions;
    pub struct ExtractTemplateOptions;
    pub struct UpdateTemplatePermissionsOptions;
    pub struct ListTemplatesOptions;
    pub struct CreateFirewallRuleOptions;
    pub struct ListFirewallRulesOptions;
    pub struct ListPortForwardingRulesOptions;
    pub struct CreatePortForwardingRuleOptions;
    pub struct ListPublicIPAddressesOptions;
    pub struct AssociateIPAddressOptions;
    pub struct ListVolumesOptions;
    pub struct ListSecurityGroupsOptions;
    pub struct ListISOsOptions;
    pub struct RegisterISOOptions;
    pub struct UpdateISOOptions;
    pub struct DeleteISOOptions;
    pub struct ExtractISOOptions;
    pub struct UpdateISOPermissionsOptions;
}

account_in_domain!(
    AccountInDomainOptions,
    DeployVirtualMachineOptions,
    ListVirtualMachinesOptions,
    RegisterTemplateOptions,
    ListTemplatesOptions,
    ListFirewallRulesOptions,
    ListPortForwardingRulesOptions,
    ListPublicIPAddressesOptions,
    AssociateIPAddressOptions,
    ListVolumesOptions,
    ListSecurityGroupsOptions,
    ListISOsOptions,
    RegisterISOOptions,
);

pub const MAX_USER_DATA_BYTES: usize = 2 * 1024;

impl DeployVirtualMachineOptions {
    /// Mutually exclusive with [`Self::data_disk_size`].
    pub fn disk_offering_id(mut self, disk_offering_id: &str) -> Result<Self> {
        check_argument(!self.base.contains_query("size"), || {
            "Mutually exclusive with size".to_string()
        })?;
        self.base.replace_query("diskofferingid", disk_offering_id);
        Ok(self)
    }

    /// Mutually exclusive with [`Self::disk_offering_id`].
    pub fn data_disk_size(mut self, size: u64) -> Result<Self> {
        check_argument(!self.base.contains_query("diskofferingid"), || {
            "Mutually exclusive with diskOfferingId".to_string()
        })?;
        self.base.replace_query("size", size.to_string());
        Ok(self)
    }

    pub fn display_name(mut self, display_name: &str) -> Self {
        self.base.replace_query("displayname", display_name);
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.base.replace_query("group", group);
        self
    }

    pub fn hypervisor(mut self, hypervisor: &str) -> Self {
        self.base.replace_query("hypervisor", hypervisor);
        self
    }

    pub fn key_pair(mut self, key_pair: &str) -> Self {
        self.base.replace_query("keypair", key_pair);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.base.replace_query("name", name);
        self
    }

    pub fn ip_on_default_network(mut self, ip: &str) -> Self {
        self.base.replace_query("ipaddress", ip);
        self
    }

    /// `iptonetworklist[n].ip` / `iptonetworklist[n].networkid` pairs, in order.
    pub fn ips_to_networks<I, K, V>(mut self, ips_to_networks: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (index, (ip, network_id)) in ips_to_networks.into_iter().enumerate() {
            self.base
                .replace_query(&format!("iptonetworklist[{index}].ip"), ip.as_ref());
            self.base.replace_query(
                &format!("iptonetworklist[{index}].networkid"),
                network_id.as_ref(),
            );
        }
        self
    }

    pub fn network_id(mut self, network_id: &str) -> Self {
        self.base.replace_query("networkids", network_id);
        self
    }

    pub fn network_ids<I, S>(mut self, network_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.base.replace_query("networkids", join_comma(network_ids));
        self
    }

    /// Network ids set so far, split back out of the joined parameter.
    pub fn get_network_ids(&self) -> Vec<String> {
        match self.base.query_values("networkids").as_slice() {
            [joined] => joined.split(',').map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }

    pub fn project_id(mut self, project_id: &str) -> Self {
        self.base.replace_query("projectid", project_id);
        self
    }

    pub fn security_group_id(mut self, security_group_id: &str) -> Self {
        self.base.replace_query("securitygroupids", security_group_id);
        self
    }

    pub fn security_group_ids<I, S>(mut self, security_group_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.base
            .replace_query("securitygroupids", join_comma(security_group_ids));
        self
    }

    /// Raw user data, sent base64-encoded. Must be 1..=2048 bytes.
    pub fn user_data(mut self, unencoded: &[u8]) -> Result<Self> {
        check_argument(!unencoded.is_empty(), || "userData cannot be empty".to_string())?;
        check_argument(unencoded.len() <= MAX_USER_DATA_BYTES, || {
            "userData cannot be larger than 2kb".to_string()
        })?;
        self.base.replace_query("userdata", STANDARD.encode(unencoded));
        Ok(self)
    }
}

impl ListVirtualMachinesOptions {
    pub fn group_id(mut self, group_id: &str) -> Self {
        self.base.replace_query("groupid", group_id);
        self
    }

    pub fn host_id(mut self, host_id: &str) -> Self {
        self.base.replace_query("hostid", host_id);
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.base.replace_query("id", id);
        self
    }

    pub fn keyword(mut self, keyword: &str) -> Self {
        self.base.replace_query("keyword", keyword);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.base.replace_query("name", name);
        self
    }

    pub fn network_id(mut self, network_id: &str) -> Self {
        self.base.replace_query("networkid", network_id);
        self
    }

    pub fn pod_id(mut self, pod_id: &str) -> Self {
        self.base.replace_query("podid", pod_id);
        self
    }

    pub fn project_id(mut self, project_id: &str) -> Self {
        self.base.replace_query("projectid", project_id);
        self
    }

    pub fn state(mut self, state: VirtualMachineState) -> Self {
        self.base.replace_query("state", state.as_str());
        self
    }

    pub fn uses_virtual_network(mut self, uses_virtual_network: bool) -> Self {
        self.base
            .replace_query("forvirtualnetwork", uses_virtual_network.to_string());
        self
    }

    pub fn zone_id(mut self, zone_id: &str) -> Self {
        self.base.replace_query("zoneid", zone_id);
        self
    }
}

impl StopVirtualMachineOptions {
    pub fn forced(mut self, forced: bool) -> Self {
        self.base.replace_query("forced", forced.to_string());
        self
    }
}

impl CreateTemplateOptions {
    pub fn bits(mut self, bits: u32) -> Self {
        self.base.replace_query("bits", bits.to_string());
        self
    }

    pub fn is_featured(mut self, featured: bool) -> Self {
        self.base.replace_query("isfeatured", featured.to_string());
        self
    }

    pub fn is_public(mut self, public: bool) -> Self {
        self.base.replace_query("ispublic", public.to_string());
        self
    }

    pub fn password_enabled(mut self, enabled: bool) -> Self {
        self.base.replace_query("passwordenabled", enabled.to_string());
        self
    }

    pub fn requires_hvm(mut self, requires: bool) -> Self {
        self.base.replace_query("requireshvm", requires.to_string());
        self
    }

    pub fn snapshot_id(mut self, snapshot_id: &str) -> Self {
        self.base.replace_query("snapshotid", snapshot_id);
        self
    }

    pub fn volume_id(mut self, volume_id: &str) -> Self {
        self.base.replace_query("volumeid", volume_id);
        self
    }
}

impl RegisterTemplateOptions {
    pub fn bits(mut self, bits: u32) -> Self {
        self.base.replace_query("bits", bits.to_string());
        self
    }

    pub fn checksum(mut self, checksum: &str) -> Self {
        self.base.replace_query("checksum", checksum);
        self
    }

    pub fn is_extractable(mut self, extractable: bool) -> Self {
        self.base.replace_query("isextractable", extractable.to_string());
        self
    }

    pub fn is_featured(mut self, featured: bool) -> Self {
        self.base.replace_query("isfeatured", featured.to_string());
        self
    }

    pub fn is_public(mut self, public: bool) -> Self {
        self.base.replace_query("ispublic", public.to_string());
        self
    }

    pub fn password_enabled(mut self, enabled: bool) -> Self {
        self.base.replace_query("passwordenabled", enabled.to_string());
        self
    }

    pub fn requires_hvm(mut self, requires: bool) -> Self {
        self.base.replace_query("requireshvm", requires.to_string());
        self
    }
}

impl UpdateTemplateOptions {
    pub fn bootable(mut self, bootable: bool) -> Self {
        self.base.replace_query("bootable", bootable.to_string());
        self
    }

    pub fn display_text(mut self, display_text: &str) -> Self {
        self.base.replace_query("displaytext", display_text);
        self
    }

    pub fn format(mut self, format: TemplateFormat) -> Self {
        self.base.replace_query("format", format.as_str());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.base.replace_query("name", name);
        self
    }

    pub fn os_type_id(mut self, os_type_id: &str) -> Self {
        self.base.replace_query("ostypeid", os_type_id);
        self
    }

    pub fn password_enabled(mut self, enabled: bool) -> Self {
        self.base.replace_query("passwordenabled", enabled.to_string());
        self
    }
}

impl DeleteTemplateOptions {
    pub fn zone_id(mut self, zone_id: &str) -> Self {
        self.base.replace_query("zoneid", zone_id);
        self
    }
}

impl ExtractTemplateOptions {
    /// Destination for FTP_UPLOAD extractions.
    pub fn url(mut self, url: &str) -> Self {
        self.base.replace_query("url", url);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOperation {
    Add,
    Remove,
    Reset,
}

impl PermissionOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionOperation::Add => "add",
            PermissionOperation::Remove => "remove",
            PermissionOperation::Reset => "reset",
        }
    }
}

impl UpdateTemplatePermissionsOptions {
    pub fn accounts<I, S>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.base.replace_query("accounts", join_comma(accounts));
        self
    }

    pub fn is_extractable(mut self, extractable: bool) -> Self {
        self.base.replace_query("isextractable", extractable.to_string());
        self
    }

    pub fn is_featured(mut self, featured: bool) -> Self {
        self.base.replace_query("isfeatured", featured.to_string());
        self
    }

    pub fn is_public(mut self, public: bool) -> Self {
        self.base.replace_query("ispublic", public.to_string());
        self
    }

    pub fn op(mut self, operation: PermissionOperation) -> Self {
        self.base.replace_query("op", operation.as_str());
        self
    }

    pub fn project_ids<I, S>(mut self, project_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.base.replace_query("projectids", join_comma(project_ids));
        self
    }
}

impl ListTemplatesOptions {
    pub fn filter(mut self, filter: TemplateFilter) -> Self {
        self.base.replace_query("templatefilter", filter.as_str());
        self
    }

    pub fn has_filter(&self) -> bool {
        self.base.contains_query("templatefilter")
    }

    pub fn hypervisor(mut self, hypervisor: &str) -> Self {
        self.base.replace_query("hypervisor", hypervisor);
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.base.replace_query("id", id);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.base.replace_query("name", name);
        self
    }

    pub fn zone_id(mut self, zone_id: &str) -> Self {
        self.base.replace_query("zoneid", zone_id);
        self
    }
}

impl CreateFirewallRuleOptions {
    pub fn start_port(mut self, port: u16) -> Self {
        self.base.replace_query("startport", port.to_string());
        self
    }

    pub fn end_port(mut self, port: u16) -> Self {
        self.base.replace_query("endport", port.to_string());
        self
    }

    pub fn cidrs<I, S>(mut self, cidrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.base.replace_query("cidrlist", join_comma(cidrs));
        self
    }

    pub fn icmp_code(mut self, code: i32) -> Self {
        self.base.replace_query("icmpcode", code.to_string());
        self
    }

    pub fn icmp_type(mut self, icmp_type: i32) -> Self {
        self.base.replace_query("icmptype", icmp_type.to_string());
        self
    }
}

impl ListFirewallRulesOptions {
    pub fn id(mut self, id: &str) -> Self {
        self.base.replace_query("id", id);
        self
    }

    pub fn ip_address_id(mut self, ip_address_id: &str) -> Self {
        self.base.replace_query("ipaddressid", ip_address_id);
        self
    }

    pub fn keyword(mut self, keyword: &str) -> Self {
        self.base.replace_query("keyword", keyword);
        self
    }

    pub fn project_id(mut self, project_id: &str) -> Self {
        self.base.replace_query("projectid", project_id);
        self
    }
}

impl ListPortForwardingRulesOptions {
    pub fn id(mut self, id: &str) -> Self {
        self.base.replace_query("id", id);
        self
    }

    pub fn ip_address_id(mut self, ip_address_id: &str) -> Self {
        self.base.replace_query("ipaddressid", ip_address_id);
        self
    }

    pub fn project_id(mut self, project_id: &str) -> Self {
        self.base.replace_query("projectid", project_id);
        self
    }
}

impl CreatePortForwardingRuleOptions {
    pub fn cidrs<I, S>(mut self, cidrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.base.replace_query("cidrlist", join_comma(cidrs));
        self
    }

    pub fn open_firewall(mut self, open: bool) -> Self {
        self.base.replace_query("openfirewall", open.to_string());
        self
    }
}

impl ListPublicIPAddressesOptions {
    pub fn allocated_only(mut self, allocated_only: bool) -> Self {
        self.base.replace_query("allocatedonly", allocated_only.to_string());
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.base.replace_query("id", id);
        self
    }

    pub fn ip_address(mut self, ip_address: &str) -> Self {
        self.base.replace_query("ipaddress", ip_address);
        self
    }

    pub fn network_id(mut self, network_id: &str) -> Self {
        self.base.replace_query("networkid", network_id);
        self
    }

    pub fn project_id(mut self, project_id: &str) -> Self {
        self.base.replace_query("projectid", project_id);
        self
    }

    pub fn uses_virtual_network(mut self, uses_virtual_network: bool) -> Self {
        self.base
            .replace_query("forvirtualnetwork", uses_virtual_network.to_string());
        self
    }

    pub fn vlan_id(mut self, vlan_id: &str) -> Self {
        self.base.replace_query("vlanid", vlan_id);
        self
    }

    pub fn zone_id(mut self, zone_id: &str) -> Self {
        self.base.replace_query("zoneid", zone_id);
        self
    }
}

impl AssociateIPAddressOptions {
    pub fn network_id(mut self, network_id: &str) -> Self {
        self.base.replace_query("networkid", network_id);
        self
    }

    pub fn project_id(mut self, project_id: &str) -> Self {
        self.base.replace_query("projectid", project_id);
        self
    }
}

impl ListVolumesOptions {
    pub fn host_id(mut self, host_id: &str) -> Self {
        self.base.replace_query("hostid", host_id);
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.base.replace_query("id", id);
        self
    }

    pub fn is_recursive(mut self, recursive: bool) -> Self {
        self.base.replace_query("isrecursive", recursive.to_string());
        self
    }

    pub fn keyword(mut self, keyword: &str) -> Self {
        self.base.replace_query("keyword", keyword);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.base.replace_query("name", name);
        self
    }

    pub fn pod_id(mut self, pod_id: &str) -> Self {
        self.base.replace_query("podid", pod_id);
        self
    }

    pub fn project_id(mut self, project_id: &str) -> Self {
        self.base.replace_query("projectid", project_id);
        self
    }

    pub fn volume_type(mut self, volume_type: VolumeType) -> Self {
        self.base.replace_query("type", volume_type.as_str());
        self
    }

    pub fn virtual_machine_id(mut self, virtual_machine_id: &str) -> Self {
        self.base.replace_query("virtualmachineid", virtual_machine_id);
        self
    }

    pub fn zone_id(mut self, zone_id: &str) -> Self {
        self.base.replace_query("zoneid", zone_id);
        self
    }
}

impl ListSecurityGroupsOptions {
    pub fn id(mut self, id: &str) -> Self {
        self.base.replace_query("id", id);
        self
    }

    pub fn keyword(mut self, keyword: &str) -> Self {
        self.base.replace_query("keyword", keyword);
        self
    }

    pub fn project_id(mut self, project_id: &str) -> Self {
        self.base.replace_query("projectid", project_id);
        self
    }

    pub fn security_group_name(mut self, name: &str) -> Self {
        self.base.replace_query("securitygroupname", name);
        self
    }

    /// Only the groups the virtual machine belongs to.
    pub fn virtual_machine_id(mut self, virtual_machine_id: &str) -> Self {
        self.base.replace_query("virtualmachineid", virtual_machine_id);
        self
    }
}

impl ListISOsOptions {
    pub fn bootable(mut self, bootable: bool) -> Self {
        self.base.replace_query("bootable", bootable.to_string());
        self
    }

    pub fn filter(mut self, filter: ISOFilter) -> Self {
        self.base.replace_query("isofilter", filter.as_str());
        self
    }

    pub fn hypervisor(mut self, hypervisor: &str) -> Self {
        self.base.replace_query("hypervisor", hypervisor);
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.base.replace_query("id", id);
        self
    }

    pub fn is_featured(mut self, featured: bool) -> Self {
        self.base.replace_query("isfeatured", featured.to_string());
        self
    }

    pub fn is_public(mut self, public: bool) -> Self {
        self.base.replace_query("ispublic", public.to_string());
        self
    }

    pub fn is_ready(mut self, ready: bool) -> Self {
        self.base.replace_query("isready", ready.to_string());
        self
    }

    pub fn keyword(mut self, keyword: &str) -> Self {
        self.base.replace_query("keyword", keyword);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.base.replace_query("name", name);
        self
    }

    pub fn zone_id(mut self, zone_id: &str) -> Self {
        self.base.replace_query("zoneid", zone_id);
        self
    }
}

impl RegisterISOOptions {
    pub fn bootable(mut self, bootable: bool) -> Self {
        self.base.replace_query("bootable", bootable.to_string());
        self
    }

    pub fn is_featured(mut self, featured: bool) -> Self {
        self.base.replace_query("isfeatured", featured.to_string());
        self
    }

    pub fn is_public(mut self, public: bool) -> Self {
        self.base.replace_query("ispublic", public.to_string());
        self
    }

    pub fn os_type_id(mut self, os_type_id: &str) -> Self {
        self.base.replace_query("ostypeid", os_type_id);
        self
    }
}

impl UpdateISOOptions {
    pub fn bootable(mut self, bootable: bool) -> Self {
        self.base.replace_query("bootable", bootable.to_string());
        self
    }

    pub fn display_text(mut self, display_text: &str) -> Self {
        self.base.replace_query("displaytext", display_text);
        self
    }

    pub fn format(mut self, format: &str) -> Self {
        self.base.replace_query("format", format);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.base.replace_query("name", name);
        self
    }

    pub fn os_type_id(mut self, os_type_id: &str) -> Self {
        self.base.replace_query("ostypeid", os_type_id);
        self
    }

    pub fn password_enabled(mut self, enabled: bool) -> Self {
        self.base.replace_query("passwordenabled", enabled.to_string());
        self
    }
}

impl DeleteISOOptions {
    /// Removes the copy in one zone only.
    pub fn zone_id(mut self, zone_id: &str) -> Self {
        self.base.replace_query("zoneid", zone_id);
        self
    }
}

impl ExtractISOOptions {
    pub fn url(mut self, url: &str) -> Self {
        self.base.replace_query("url", url);
        self
    }
}

impl UpdateISOPermissionsOptions {
    pub fn accounts<I, S>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.base.replace_query("accounts", join_comma(accounts));
        self
    }

    pub fn is_extractable(mut self, extractable: bool) -> Self {
        self.base.replace_query("isextractable", extractable.to_string());
        self
    }

    pub fn is_featured(mut self, featured: bool) -> Self {
        self.base.replace_query("isfeatured", featured.to_string());
        self
    }

    pub fn is_public(mut self, public: bool) -> Self {
        self.base.replace_query("ispublic", public.to_string());
        self
    }

    pub fn op(mut self, operation: PermissionOperation) -> Self {
        self.base.replace_query("op", operation.as_str());
        self
    }
}
