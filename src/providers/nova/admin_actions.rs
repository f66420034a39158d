//! Administrative server actions. Each is a POST to `/servers/{id}/action`
//! whose body names the action; the boolean ones answer `false` when the
//! server does not exist.

use super::domain::BackupType;
use super::options::{json_payload, CreateBackupOfServerOptions};
use super::{id_from_location, Accept, ZoneClient};
use crate::core::fallback::Fallback;
use crate::core::http::HttpRequestBuilder;
use crate::utils::error::Result;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Clone)]
pub struct AdminActionsApi {
    zone: ZoneClient,
}

impl AdminActionsApi {
    pub(crate) fn new(zone: ZoneClient) -> Self {
        Self { zone }
    }

    pub async fn suspend(&self, id: &str) -> Result<bool> {
        self.standard_action(id, "suspend").await
    }

    pub async fn resume(&self, id: &str) -> Result<bool> {
        self.standard_action(id, "resume").await
    }

    pub async fn migrate(&self, id: &str) -> Result<bool> {
        self.standard_action(id, "migrate").await
    }

    pub async fn pause(&self, id: &str) -> Result<bool> {
        self.standard_action(id, "pause").await
    }

    pub async fn unpause(&self, id: &str) -> Result<bool> {
        self.standard_action(id, "unpause").await
    }

    pub async fn lock(&self, id: &str) -> Result<bool> {
        self.standard_action(id, "lock").await
    }

    pub async fn unlock(&self, id: &str) -> Result<bool> {
        self.standard_action(id, "unlock").await
    }

    pub async fn reset_network(&self, id: &str) -> Result<bool> {
        self.standard_action(id, "resetNetwork").await
    }

    pub async fn inject_network_info(&self, id: &str) -> Result<bool> {
        self.standard_action(id, "injectNetworkInfo").await
    }

    pub async fn live_migrate(
        &self,
        id: &str,
        host: &str,
        block_migration: bool,
        disk_over_commit: bool,
    ) -> Result<bool> {
        let body = json!({"os-migrateLive": {
            "host": host,
            "block_migration": block_migration,
            "disk_over_commit": disk_over_commit,
        }});
        self.zone
            .send_void(self.action(id, body)?)
            .await
            .false_on_not_found()
    }

    /// Starts a backup and answers the id of the image it will produce.
    pub async fn create_backup(
        &self,
        id: &str,
        image_name: &str,
        backup_type: BackupType,
        rotation: u32,
        options: &CreateBackupOfServerOptions,
    ) -> Result<String> {
        info!(server_id = id, image_name, "Creating backup");
        let builder = self
            .zone
            .request(Method::POST, &["servers", id, "action"], Accept::Json)?
            .payload(options.to_payload(image_name, backup_type, rotation));
        let response = self.zone.send(builder).await?;
        id_from_location(&response)
    }

    fn action(&self, id: &str, body: Value) -> Result<HttpRequestBuilder> {
        Ok(self
            .zone
            .request(Method::POST, &["servers", id, "action"], Accept::Omitted)?
            .payload(json_payload(body)))
    }

    async fn standard_action(&self, id: &str, action: &str) -> Result<bool> {
        let mut body = serde_json::Map::new();
        body.insert(action.to_string(), Value::Null);
        self.zone
            .send_void(self.action(id, Value::Object(body))?)
            .await
            .false_on_not_found()
    }
}
