use super::domain::{RebootType, Resource, Server, ServerCreated};
use super::options::{check_metadata, json_payload, CreateServerOptions, ListOptions, RebuildServerOptions};
use super::{id_from_location, Accept, ZoneClient};
use crate::core::fallback::Fallback;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ServerApi {
    zone: ZoneClient,
}

impl ServerApi {
    pub(crate) fn new(zone: ZoneClient) -> Self {
        Self { zone }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Resource>> {
        let builder = options.apply_to(self.zone.get(&["servers"])?);
        self.zone.fetch(builder, "servers").await.empty_on_not_found()
    }

    pub async fn list_in_detail(&self, options: &ListOptions) -> Result<Vec<Server>> {
        let builder = options.apply_to(self.zone.get(&["servers", "detail"])?);
        self.zone.fetch(builder, "servers").await.empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Server>> {
        let builder = self.zone.get(&["servers", id])?;
        self.zone.fetch(builder, "server").await.null_on_not_found()
    }

    pub async fn create(
        &self,
        name: &str,
        image_ref: &str,
        flavor_ref: &str,
        options: &CreateServerOptions,
    ) -> Result<ServerCreated> {
        info!(name, image_ref, flavor_ref, "Creating server");
        let builder = self
            .zone
            .request(Method::POST, &["servers"], Accept::Json)?
            .payload(options.to_payload(name, image_ref, flavor_ref));
        self.zone.fetch(builder, "server").await
    }

    /// `false` when the server was already gone.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let builder = self
            .zone
            .request(Method::DELETE, &["servers", id], Accept::Json)?;
        self.zone.send_void(builder).await.false_on_not_found()
    }

    pub async fn start(&self, id: &str) -> Result<()> {
        self.action(id, json!({"os-start": null})).await
    }

    pub async fn stop(&self, id: &str) -> Result<()> {
        self.action(id, json!({"os-stop": null})).await
    }

    pub async fn reboot(&self, id: &str, reboot_type: RebootType) -> Result<()> {
        self.action(id, json!({"reboot": {"type": reboot_type.as_str()}}))
            .await
    }

    pub async fn resize(&self, id: &str, flavor_id: &str) -> Result<()> {
        self.action(id, json!({"resize": {"flavorRef": flavor_id}}))
            .await
    }

    pub async fn confirm_resize(&self, id: &str) -> Result<()> {
        self.action(id, json!({"confirmResize": null})).await
    }

    pub async fn revert_resize(&self, id: &str) -> Result<()> {
        self.action(id, json!({"revertResize": null})).await
    }

    pub async fn rebuild(&self, id: &str, options: &RebuildServerOptions) -> Result<()> {
        let builder = self
            .zone
            .request(Method::POST, &["servers", id, "action"], Accept::Any)?
            .payload(options.to_payload());
        self.zone.send_void(builder).await
    }

    pub async fn change_admin_pass(&self, id: &str, admin_pass: &str) -> Result<()> {
        self.action(id, json!({"changePassword": {"adminPass": admin_pass}}))
            .await
    }

    pub async fn rename(&self, id: &str, new_name: &str) -> Result<()> {
        let builder = self
            .zone
            .request(Method::PUT, &["servers", id], Accept::Any)?
            .payload(json_payload(json!({"server": {"name": new_name}})));
        self.zone.send_void(builder).await
    }

    /// Snapshots the server and answers the id of the new image.
    pub async fn create_image_from_server(&self, name: &str, server_id: &str) -> Result<String> {
        let builder = self
            .zone
            .request(Method::POST, &["servers", server_id, "action"], Accept::Json)?
            .payload(json_payload(json!({"createImage": {"name": name, "metadata": {}}})));
        let response = self.zone.send(builder).await?;
        let image_id = id_from_location(&response)?;
        debug!(server_id, image_id = %image_id, "Image requested");
        Ok(image_id)
    }

    pub async fn get_metadata(&self, id: &str) -> Result<BTreeMap<String, String>> {
        let builder = self.zone.get(&["servers", id, "metadata"])?;
        self.zone.fetch(builder, "metadata").await.empty_on_not_found()
    }

    /// Replaces all metadata of the server.
    pub async fn set_metadata(
        &self,
        id: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>> {
        check_metadata(metadata)?;
        let builder = self
            .zone
            .request(Method::PUT, &["servers", id, "metadata"], Accept::Json)?
            .payload(json_payload(json!({ "metadata": metadata })));
        self.zone.fetch(builder, "metadata").await
    }

    /// Merges `metadata` into the existing entries.
    pub async fn update_metadata(
        &self,
        id: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>> {
        check_metadata(metadata)?;
        let builder = self
            .zone
            .request(Method::POST, &["servers", id, "metadata"], Accept::Json)?
            .payload(json_payload(json!({ "metadata": metadata })));
        self.zone.fetch(builder, "metadata").await
    }

    pub async fn get_metadata_item(&self, id: &str, key: &str) -> Result<Option<String>> {
        let builder = self.zone.get(&["servers", id, "metadata", key])?;
        let item = self
            .zone
            .fetch::<BTreeMap<String, String>>(builder, "metadata")
            .await
            .null_on_not_found()?;
        Ok(item.and_then(|mut entries| entries.remove(key)))
    }

    pub async fn set_metadata_item(&self, id: &str, key: &str, value: &str) -> Result<String> {
        let builder = self
            .zone
            .request(Method::PUT, &["servers", id, "metadata", key], Accept::Json)?
            .payload(json_payload(json!({ "metadata": BTreeMap::from([(key, value)]) })));
        let mut entries: BTreeMap<String, String> = self.zone.fetch(builder, "metadata").await?;
        Ok(entries.remove(key).unwrap_or_else(|| value.to_string()))
    }

    pub async fn delete_metadata_item(&self, id: &str, key: &str) -> Result<()> {
        let builder = self
            .zone
            .request(Method::DELETE, &["servers", id, "metadata", key], Accept::Any)?;
        self.zone.send_void(builder).await.void_on_not_found()
    }

    /// Hypervisor counters of the server, absent when Nova refuses (403),
    /// does not know the server (404) or fails to collect them (500).
    pub async fn get_diagnostics(&self, id: &str) -> Result<Option<BTreeMap<String, String>>> {
        let builder = self.zone.get(&["servers", id, "diagnostics"])?;
        let counters: Option<BTreeMap<String, Value>> =
            self.zone.fetch_unless(builder, &[403, 404, 500]).await?;
        Ok(counters.map(|counters| {
            counters
                .into_iter()
                .map(|(name, value)| match value {
                    Value::String(text) => (name, text),
                    other => (name, other.to_string()),
                })
                .collect()
        }))
    }

    async fn action(&self, id: &str, body: Value) -> Result<()> {
        let builder = self
            .zone
            .request(Method::POST, &["servers", id, "action"], Accept::Any)?
            .payload(json_payload(body));
        self.zone.send_void(builder).await
    }
}
