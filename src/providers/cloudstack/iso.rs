//! Bootable and data ISO images: registration, permissions, and attaching
//! them to virtual machines as a CD-ROM.

use super::domain::{AsyncCreateResponse, AsyncJobResponse, ExtractMode, Iso, TemplatePermission};
use super::options::{
    AccountInDomainOptions, DeleteISOOptions, ExtractISOOptions, ListISOsOptions,
    RegisterISOOptions, UpdateISOOptions, UpdateISOPermissionsOptions,
};
use super::CloudStackApi;
use crate::core::fallback::Fallback;
use crate::core::http::APPLICATION_JSON;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;
use tracing::info;

const LIST: &str = "listIsos";
const KEY: &str = "iso";

#[derive(Debug, Clone)]
pub struct ISOApi {
    api: CloudStackApi,
}

impl ISOApi {
    pub(crate) fn new(api: CloudStackApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, options: &ListISOsOptions) -> Result<Vec<Iso>> {
        let builder = options.apply_to(self.api.list_command(LIST));
        self.api.call_list(LIST, KEY, builder).await.empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Iso>> {
        let builder = self.api.list_command(LIST).add_query_param("id", id);
        Ok(self
            .api
            .call_named(LIST, KEY, builder)
            .await
            .null_on_not_found()?
            .flatten())
    }

    pub async fn register(
        &self,
        name: &str,
        display_text: &str,
        url: &str,
        zone_id: &str,
        options: &RegisterISOOptions,
    ) -> Result<Iso> {
        info!(name, zone_id, "Registering ISO");
        let builder = self
            .api
            .command("registerIso")
            .add_query_param("name", name)
            .add_query_param("displaytext", display_text)
            .add_query_param("url", url)
            .add_query_param("zoneid", zone_id);
        self.api
            .call_one("registerIso", KEY, options.apply_to(builder))
            .await
    }

    pub async fn attach(&self, id: &str, virtual_machine_id: &str) -> Result<AsyncJobResponse> {
        let builder = self
            .api
            .command("attachIso")
            .add_query_param("id", id)
            .add_query_param("virtualmachineid", virtual_machine_id);
        self.api.call("attachIso", builder).await
    }

    /// A virtual machine holds at most one ISO, so only the machine is named.
    pub async fn detach(&self, virtual_machine_id: &str) -> Result<AsyncJobResponse> {
        let builder = self
            .api
            .command("detachIso")
            .add_query_param("virtualmachineid", virtual_machine_id);
        self.api.call("detachIso", builder).await
    }

    pub async fn update(&self, id: &str, options: &UpdateISOOptions) -> Result<Iso> {
        let builder = self.api.command("updateIso").add_query_param("id", id);
        self.api
            .call_one("updateIso", KEY, options.apply_to(builder))
            .await
    }

    pub async fn delete(&self, id: &str, options: &DeleteISOOptions) -> Result<AsyncJobResponse> {
        let builder = self.api.command("deleteIso").add_query_param("id", id);
        self.api.call("deleteIso", options.apply_to(builder)).await
    }

    pub async fn copy(
        &self,
        id: &str,
        source_zone_id: &str,
        dest_zone_id: &str,
    ) -> Result<AsyncJobResponse> {
        let builder = self
            .api
            .command("copyIso")
            .add_query_param("id", id)
            .add_query_param("sourcezoneid", source_zone_id)
            .add_query_param("destzoneid", dest_zone_id);
        self.api.call("copyIso", builder).await
    }

    /// Asks for JSON but the answer carries nothing worth reading.
    pub async fn update_permissions(
        &self,
        id: &str,
        options: &UpdateISOPermissionsOptions,
    ) -> Result<()> {
        let builder = self
            .api
            .command("updateIsoPermissions")
            .add_query_param("id", id);
        self.api
            .call_void(options.apply_to(builder).add_header("Accept", APPLICATION_JSON))
            .await
    }

    pub async fn list_permissions(
        &self,
        id: &str,
        options: &AccountInDomainOptions,
    ) -> Result<Vec<TemplatePermission>> {
        let builder = self
            .api
            .list_command("listIsoPermissions")
            .add_query_param("id", id);
        self.api
            .call_list(
                "listIsoPermissions",
                "templatepermission",
                options.apply_to(builder),
            )
            .await
    }

    pub async fn extract(
        &self,
        id: &str,
        mode: ExtractMode,
        zone_id: &str,
        options: &ExtractISOOptions,
    ) -> Result<AsyncCreateResponse> {
        let builder = self
            .api
            .command("extractIso")
            .add_query_param("id", id)
            .add_query_param("mode", mode.as_str())
            .add_query_param("zoneid", zone_id);
        self.api.call("extractIso", options.apply_to(builder)).await
    }
}
