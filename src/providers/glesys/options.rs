//! Form-parameter options for the GleSYS calls. Setters append in call
//! order, which is the order the parameters travel in.

use crate::core::options::{BaseOptions, RequestOptions};
use crate::request_options;

request_options! {
    pub struct CreateServerOptions;
    pub struct UpdateServerOptions;
    pub struct CloneServerOptions;
    pub struct ServerStatusOptions;
    pub struct DomainOptions;
    pub struct AddDomainOptions;
    pub struct UpdateRecordOptions;
    pub struct AddRecordOptions;
    pub struct CreateAccountOptions;
    pub struct UpdateAccountOptions;
}

impl CreateServerOptions {
    pub fn description(mut self, description: &str) -> Self {
        self.base.replace_form("description", description);
        self
    }

    /// Address to assign instead of a free one.
    pub fn ip(mut self, ip: &str) -> Self {
        self.base.replace_form("ip", ip);
        self
    }
}

/// Sizing settings shared by `server/edit` and `server/clone`.
pub trait ServerSizing: Sized {
    fn base_mut(&mut self) -> &mut BaseOptions;

    fn description(mut self, description: &str) -> Self {
        self.base_mut().replace_form("description", description);
        self
    }

    fn disk_size_gb(mut self, disk_size_gb: u32) -> Self {
        self.base_mut().replace_form("disksize", disk_size_gb.to_string());
        self
    }

    fn memory_size_mb(mut self, memory_size_mb: u32) -> Self {
        self.base_mut().replace_form("memorysize", memory_size_mb.to_string());
        self
    }

    fn cpu_cores(mut self, cpu_cores: u32) -> Self {
        self.base_mut().replace_form("cpucores", cpu_cores.to_string());
        self
    }
}

impl ServerSizing for UpdateServerOptions {
    fn base_mut(&mut self) -> &mut BaseOptions {
        &mut self.base
    }
}

impl ServerSizing for CloneServerOptions {
    fn base_mut(&mut self) -> &mut BaseOptions {
        &mut self.base
    }
}

impl UpdateServerOptions {
    pub fn hostname(mut self, hostname: &str) -> Self {
        self.base.replace_form("hostname", hostname);
        self
    }

    pub fn transfer_gb(mut self, transfer_gb: u32) -> Self {
        self.base.replace_form("transfer", transfer_gb.to_string());
        self
    }
}

impl ServerStatusOptions {
    fn status_type(mut self, status_type: &str) -> Self {
        if !self.base.form_values("statustype").contains(&status_type) {
            self.base.add_form("statustype", status_type);
        }
        self
    }

    pub fn state(self) -> Self {
        self.status_type("state")
    }

    pub fn cpu(self) -> Self {
        self.status_type("cpu")
    }

    pub fn memory(self) -> Self {
        self.status_type("memory")
    }

    pub fn disk(self) -> Self {
        self.status_type("disk")
    }

    pub fn uptime(self) -> Self {
        self.status_type("uptime")
    }
}

/// `server/destroy` always says whether the addresses stay on the account;
/// by default they are released with the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyServerOptions {
    base: BaseOptions,
}

impl Default for DestroyServerOptions {
    fn default() -> Self {
        Self::discard_ip()
    }
}

impl RequestOptions for DestroyServerOptions {
    fn base(&self) -> &BaseOptions {
        &self.base
    }
}

impl DestroyServerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the addresses of the server on the account.
    pub fn keep_ip() -> Self {
        Self::with_keep_ip(true)
    }

    /// Releases the addresses together with the server.
    pub fn discard_ip() -> Self {
        Self::with_keep_ip(false)
    }

    pub fn keep_ip_flag(mut self, keep_ip: bool) -> Self {
        self.base.replace_form("keepip", keep_ip.to_string());
        self
    }

    fn with_keep_ip(keep_ip: bool) -> Self {
        Self {
            base: BaseOptions::default(),
        }
        .keep_ip_flag(keep_ip)
    }
}

/// Zone settings accepted by `domain/add` and `domain/edit`.
pub trait DomainSettings: Sized {
    fn base_mut(&mut self) -> &mut BaseOptions;

    fn expire(mut self, expire: u32) -> Self {
        self.base_mut().replace_form("expire", expire.to_string());
        self
    }

    fn minimum(mut self, minimum: u32) -> Self {
        self.base_mut().replace_form("minimum", minimum.to_string());
        self
    }

    fn refresh(mut self, refresh: u32) -> Self {
        self.base_mut().replace_form("refresh", refresh.to_string());
        self
    }

    fn responsible_person(mut self, responsible_person: &str) -> Self {
        self.base_mut().replace_form("responsibleperson", responsible_person);
        self
    }

    fn retry(mut self, retry: u32) -> Self {
        self.base_mut().replace_form("retry", retry.to_string());
        self
    }

    fn ttl(mut self, ttl: u32) -> Self {
        self.base_mut().replace_form("ttl", ttl.to_string());
        self
    }
}

impl DomainSettings for DomainOptions {
    fn base_mut(&mut self) -> &mut BaseOptions {
        &mut self.base
    }
}

impl DomainSettings for AddDomainOptions {
    fn base_mut(&mut self) -> &mut BaseOptions {
        &mut self.base
    }
}

impl AddDomainOptions {
    pub fn primary_name_server(mut self, primary_name_server: &str) -> Self {
        self.base.replace_form("primarynameserver", primary_name_server);
        self
    }

    /// Whether GleSYS seeds the zone with its default records.
    pub fn create_records(mut self, create_records: bool) -> Self {
        self.base
            .replace_form("createrecords", if create_records { "1" } else { "0" });
        self
    }
}

impl UpdateRecordOptions {
    pub fn host(mut self, host: &str) -> Self {
        self.base.replace_form("host", host);
        self
    }

    pub fn record_type(mut self, record_type: &str) -> Self {
        self.base.replace_form("type", record_type);
        self
    }

    pub fn data(mut self, data: &str) -> Self {
        self.base.replace_form("data", data);
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.base.replace_form("ttl", ttl.to_string());
        self
    }
}

impl AddRecordOptions {
    pub fn ttl(mut self, ttl: u32) -> Self {
        self.base.replace_form("ttl", ttl.to_string());
        self
    }
}

/// Mailbox settings accepted by `email/createaccount` and `email/editaccount`.
pub trait EmailAccountSettings: Sized {
    fn base_mut(&mut self) -> &mut BaseOptions;

    /// 0 (off) to 5 (aggressive).
    fn antispam_level(mut self, level: u8) -> Self {
        self.base_mut().replace_form("antispamlevel", level.to_string());
        self
    }

    fn anti_virus(mut self, enabled: bool) -> Self {
        self.base_mut().replace_form("antivirus", yes_no(enabled));
        self
    }

    fn auto_respond(mut self, enabled: bool) -> Self {
        self.base_mut().replace_form("autorespond", yes_no(enabled));
        self
    }

    fn auto_respond_message(mut self, message: &str) -> Self {
        self.base_mut().replace_form("autorespondmessage", message);
        self
    }

    fn auto_respond_save_email(mut self, enabled: bool) -> Self {
        self.base_mut().replace_form("autorespondsaveemail", yes_no(enabled));
        self
    }

    fn quota_mb(mut self, quota_mb: u32) -> Self {
        self.base_mut().replace_form("quota", quota_mb.to_string());
        self
    }
}

fn yes_no(enabled: bool) -> &'static str {
    if enabled {
        "yes"
    } else {
        "no"
    }
}

impl EmailAccountSettings for CreateAccountOptions {
    fn base_mut(&mut self) -> &mut BaseOptions {
        &mut self.base
    }
}

impl EmailAccountSettings for UpdateAccountOptions {
    fn base_mut(&mut self) -> &mut BaseOptions {
        &mut self.base
    }
}

impl UpdateAccountOptions {
    pub fn password(mut self, password: &str) -> Self {
        self.base.replace_form("password", password);
        self
    }
}
