use super::domain::IpDetails;
use super::GlesysApi;
use crate::core::fallback::Fallback;
use crate::utils::error::Result;
use serde::Deserialize;

/// `ip/listfree` answers the addresses together with what was asked for.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FreeIps {
    #[serde(rename = "ipaddresses")]
    addresses: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct IpApi {
    api: GlesysApi,
}

impl IpApi {
    pub(crate) fn new(api: GlesysApi) -> Self {
        Self { api }
    }

    /// Addresses owned by the account.
    pub async fn list(&self) -> Result<Vec<IpDetails>> {
        let builder = self.api.get(&["ip", "listown"])?;
        self.api.fetch(builder, "iplist").await.empty_on_not_found()
    }

    pub async fn get(&self, ip: &str) -> Result<Option<IpDetails>> {
        let builder = self.api.get(&["ip", "details", "ipaddress", ip])?;
        self.api.fetch(builder, "details").await.null_on_not_found()
    }

    /// Addresses free to take in a datacenter for a platform.
    pub async fn list_free(
        &self,
        ip_version: u8,
        datacenter: &str,
        platform: &str,
    ) -> Result<Vec<String>> {
        let version = ip_version.to_string();
        let builder = self.api.get(&[
            "ip",
            "listfree",
            "ipversion",
            version.as_str(),
            "datacenter",
            datacenter,
            "platform",
            platform,
        ])?;
        let free: FreeIps = self
            .api
            .fetch(builder, "iplist")
            .await
            .empty_on_not_found()?;
        Ok(free.addresses)
    }

    pub async fn take(&self, ip: &str) -> Result<IpDetails> {
        let builder = self
            .api
            .post(&["ip", "take"])?
            .add_form_param("ipaddress", ip);
        self.api.fetch(builder, "details").await
    }

    pub async fn release(&self, ip: &str) -> Result<IpDetails> {
        let builder = self
            .api
            .post(&["ip", "release"])?
            .add_form_param("ipaddress", ip);
        self.api.fetch(builder, "details").await
    }

    pub async fn add_to_server(&self, ip: &str, server_id: &str) -> Result<()> {
        let builder = self
            .api
            .post(&["ip", "add"])?
            .add_form_param("ipaddress", ip)
            .add_form_param("serverid", server_id);
        self.api.send_void(builder).await
    }

    pub async fn remove_from_server(&self, ip: &str, server_id: &str) -> Result<()> {
        self.remove(ip, server_id, false).await
    }

    /// Removes the address and hands it back to GleSYS in one call.
    pub async fn remove_from_server_and_release(&self, ip: &str, server_id: &str) -> Result<()> {
        self.remove(ip, server_id, true).await
    }

    pub async fn set_ptr(&self, ip: &str, ptr: &str) -> Result<IpDetails> {
        let builder = self
            .api
            .post(&["ip", "setptr"])?
            .add_form_param("ipaddress", ip)
            .add_form_param("data", ptr);
        self.api.fetch(builder, "details").await
    }

    pub async fn reset_ptr(&self, ip: &str) -> Result<IpDetails> {
        let builder = self
            .api
            .post(&["ip", "resetptr"])?
            .add_form_param("ipaddress", ip);
        self.api.fetch(builder, "details").await
    }

    async fn remove(&self, ip: &str, server_id: &str, release: bool) -> Result<()> {
        let mut builder = self.api.post(&["ip", "remove"])?;
        if release {
            builder = builder.add_form_param("release", "true");
        }
        let builder = builder
            .add_form_param("ipaddress", ip)
            .add_form_param("serverid", server_id);
        self.api.send_void(builder).await
    }
}
