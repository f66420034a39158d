//! The `os-volumes` extension: volumes, their attachments to servers and
//! their snapshots.

use super::domain::{Volume, VolumeAttachment, VolumeSnapshot};
use super::options::{json_payload, CreateVolumeOptions, CreateVolumeSnapshotOptions};
use super::{Accept, ZoneClient};
use crate::core::fallback::Fallback;
use crate::utils::error::Result;
use reqwest::Method;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct VolumeApi {
    zone: ZoneClient,
}

impl VolumeApi {
    pub(crate) fn new(zone: ZoneClient) -> Self {
        Self { zone }
    }

    pub async fn list(&self) -> Result<Vec<Volume>> {
        let builder = self.zone.get(&["os-volumes"])?;
        self.zone.fetch(builder, "volumes").await.empty_on_not_found()
    }

    pub async fn list_in_detail(&self) -> Result<Vec<Volume>> {
        let builder = self.zone.get(&["os-volumes", "detail"])?;
        self.zone.fetch(builder, "volumes").await.empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Volume>> {
        let builder = self.zone.get(&["os-volumes", id])?;
        self.zone.fetch(builder, "volume").await.null_on_not_found()
    }

    pub async fn create(&self, size_gb: u32, options: &CreateVolumeOptions) -> Result<Volume> {
        let builder = self
            .zone
            .request(Method::POST, &["os-volumes"], Accept::Json)?
            .payload(options.to_payload(size_gb));
        self.zone.fetch(builder, "volume").await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let builder = self
            .zone
            .request(Method::DELETE, &["os-volumes", id], Accept::Json)?;
        self.zone.send_void(builder).await.false_on_not_found()
    }

    pub async fn list_attachments(&self, server_id: &str) -> Result<Vec<VolumeAttachment>> {
        let builder = self
            .zone
            .get(&["servers", server_id, "os-volume_attachments"])?;
        self.zone
            .fetch(builder, "volumeAttachments")
            .await
            .empty_on_not_found()
    }

    pub async fn get_attachment(
        &self,
        volume_id: &str,
        server_id: &str,
    ) -> Result<Option<VolumeAttachment>> {
        let builder = self
            .zone
            .get(&["servers", server_id, "os-volume_attachments", volume_id])?;
        self.zone
            .fetch(builder, "volumeAttachment")
            .await
            .null_on_not_found()
    }

    pub async fn attach(
        &self,
        volume_id: &str,
        server_id: &str,
        device: &str,
    ) -> Result<VolumeAttachment> {
        let builder = self
            .zone
            .request(
                Method::POST,
                &["servers", server_id, "os-volume_attachments"],
                Accept::Json,
            )?
            .payload(json_payload(
                json!({"volumeAttachment": {"volumeId": volume_id, "device": device}}),
            ));
        self.zone.fetch(builder, "volumeAttachment").await
    }

    pub async fn detach(&self, volume_id: &str, server_id: &str) -> Result<bool> {
        let builder = self.zone.request(
            Method::DELETE,
            &["servers", server_id, "os-volume_attachments", volume_id],
            Accept::Json,
        )?;
        self.zone.send_void(builder).await.false_on_not_found()
    }

    pub async fn list_snapshots(&self) -> Result<Vec<VolumeSnapshot>> {
        let builder = self.zone.get(&["os-snapshots"])?;
        self.zone.fetch(builder, "snapshots").await.empty_on_not_found()
    }

    pub async fn list_snapshots_in_detail(&self) -> Result<Vec<VolumeSnapshot>> {
        let builder = self.zone.get(&["os-snapshots", "detail"])?;
        self.zone.fetch(builder, "snapshots").await.empty_on_not_found()
    }

    pub async fn get_snapshot(&self, id: &str) -> Result<Option<VolumeSnapshot>> {
        let builder = self.zone.get(&["os-snapshots", id])?;
        self.zone.fetch(builder, "snapshot").await.null_on_not_found()
    }

    pub async fn create_snapshot(
        &self,
        volume_id: &str,
        options: &CreateVolumeSnapshotOptions,
    ) -> Result<VolumeSnapshot> {
        let builder = self
            .zone
            .request(Method::POST, &["os-snapshots"], Accept::Json)?
            .payload(options.to_payload(volume_id));
        self.zone.fetch(builder, "snapshot").await
    }

    pub async fn delete_snapshot(&self, id: &str) -> Result<bool> {
        let builder = self
            .zone
            .request(Method::DELETE, &["os-snapshots", id], Accept::Json)?;
        self.zone.send_void(builder).await.false_on_not_found()
    }
}
