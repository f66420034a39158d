use super::domain::{
    AllowedArgumentsForCreateServer, Console, OsTemplate, ResourceUsage, Server, ServerDetails,
    ServerLimits, ServerSpec, ServerStatus,
};
use super::options::{
    CloneServerOptions, CreateServerOptions, DestroyServerOptions, ServerStatusOptions,
    UpdateServerOptions,
};
use super::GlesysApi;
use crate::core::fallback::Fallback;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;
use reqwest::Method;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ServerApi {
    api: GlesysApi,
}

impl ServerApi {
    pub(crate) fn new(api: GlesysApi) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Server>> {
        let builder = self.api.post(&["server", "list"])?;
        self.api.fetch(builder, "servers").await.empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<ServerDetails>> {
        let builder = self
            .api
            .post(&["server", "details"])?
            .add_form_param("includestate", "true")
            .add_form_param("serverid", id);
        self.api.fetch(builder, "server").await.null_on_not_found()
    }

    /// Create arguments per platform, keyed by platform name.
    pub async fn allowed_arguments_for_create_by_platform(
        &self,
    ) -> Result<BTreeMap<String, AllowedArgumentsForCreateServer>> {
        let builder = self.api.get(&["server", "allowedarguments"])?;
        self.api.fetch(builder, "argumentslist").await
    }

    /// Every template of every platform.
    pub async fn list_templates(&self) -> Result<Vec<OsTemplate>> {
        let builder = self.api.get(&["server", "templates"])?;
        let by_platform: BTreeMap<String, Vec<OsTemplate>> =
            self.api.fetch(builder, "templates").await?;
        Ok(by_platform.into_values().flatten().collect())
    }

    pub async fn create_with_hostname_and_root_password(
        &self,
        spec: &ServerSpec,
        hostname: &str,
        root_password: &str,
        options: &CreateServerOptions,
    ) -> Result<ServerDetails> {
        info!(hostname, datacenter = %spec.datacenter, platform = %spec.platform, "Creating server");
        let mut builder = self
            .api
            .post(&["server", "create"])?
            .add_form_param("hostname", hostname)
            .add_form_param("rootpassword", root_password);
        for (key, value) in spec.form_pairs() {
            builder = builder.add_form_param(key, value);
        }
        self.api.fetch(options.apply_to(builder), "server").await
    }

    /// `None` when the provider accepts the change without echoing the server.
    pub async fn update(
        &self,
        id: &str,
        options: &UpdateServerOptions,
    ) -> Result<Option<ServerDetails>> {
        let builder = self
            .api
            .post(&["server", "edit"])?
            .add_form_param("serverid", id);
        self.api.fetch_optional(options.apply_to(builder), "server").await
    }

    pub async fn clone(
        &self,
        id: &str,
        hostname: &str,
        options: &CloneServerOptions,
    ) -> Result<ServerDetails> {
        let builder = self
            .api
            .post(&["server", "clone"])?
            .add_form_param("serverid", id)
            .add_form_param("hostname", hostname);
        self.api.fetch(options.apply_to(builder), "server").await
    }

    pub async fn get_status(
        &self,
        id: &str,
        options: &ServerStatusOptions,
    ) -> Result<Option<ServerStatus>> {
        let builder = self
            .api
            .post(&["server", "status"])?
            .add_form_param("serverid", id);
        self.api
            .fetch(options.apply_to(builder), "server")
            .await
            .null_on_not_found()
    }

    pub async fn get_limits(&self, id: &str) -> Result<ServerLimits> {
        let builder = self
            .api
            .post(&["server", "limits"])?
            .add_form_param("serverid", id);
        self.api.fetch(builder, "limits").await
    }

    pub async fn get_console(&self, id: &str) -> Result<Option<Console>> {
        let builder = self
            .api
            .post(&["server", "console"])?
            .add_form_param("serverid", id);
        self.api.fetch(builder, "console").await.null_on_not_found()
    }

    pub async fn start(&self, id: &str) -> Result<()> {
        self.power("start", None, id).await
    }

    pub async fn stop(&self, id: &str) -> Result<()> {
        self.power("stop", None, id).await
    }

    /// Pulls the plug instead of asking the guest to shut down.
    pub async fn hard_stop(&self, id: &str) -> Result<()> {
        self.power("stop", Some("hard"), id).await
    }

    pub async fn reboot(&self, id: &str) -> Result<()> {
        self.power("reboot", None, id).await
    }

    pub async fn destroy(&self, id: &str, options: &DestroyServerOptions) -> Result<()> {
        info!(server_id = id, "Destroying server");
        let builder = self
            .api
            .request(Method::POST, &["server", "destroy"])?
            .add_form_param("serverid", id);
        self.api.send_void(options.apply_to(builder)).await
    }

    pub async fn get_resource_usage(
        &self,
        id: &str,
        resource: &str,
        resolution: &str,
    ) -> Result<ResourceUsage> {
        let builder = self
            .api
            .post(&["server", "resourceusage"])?
            .add_form_param("serverid", id)
            .add_form_param("resource", resource)
            .add_form_param("resolution", resolution);
        self.api.fetch(builder, "usage").await
    }

    async fn power(&self, action: &str, stop_type: Option<&str>, id: &str) -> Result<()> {
        let mut builder = self.api.post(&["server", action])?;
        if let Some(stop_type) = stop_type {
            builder = builder.add_form_param("type", stop_type);
        }
        self.api
            .send_void(builder.add_form_param("serverid", id))
            .await
    }
}
