//! The `os-volume-types` extension and the extra specs of each type.

use super::domain::VolumeType;
use super::options::{json_payload, CreateVolumeTypeOptions};
use super::{Accept, ZoneClient};
use crate::core::fallback::Fallback;
use crate::utils::error::Result;
use reqwest::Method;
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct VolumeTypeApi {
    zone: ZoneClient,
}

impl VolumeTypeApi {
    pub(crate) fn new(zone: ZoneClient) -> Self {
        Self { zone }
    }

    pub async fn list(&self) -> Result<Vec<VolumeType>> {
        let builder = self.zone.get(&["os-volume-types"])?;
        self.zone.fetch(builder, "volume_types").await.empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<VolumeType>> {
        let builder = self.zone.get(&["os-volume-types", id])?;
        self.zone.fetch(builder, "volume_type").await.null_on_not_found()
    }

    pub async fn create(&self, name: &str, options: &CreateVolumeTypeOptions) -> Result<VolumeType> {
        let builder = self
            .zone
            .request(Method::POST, &["os-volume-types"], Accept::Json)?
            .payload(options.to_payload(name));
        self.zone.fetch(builder, "volume_type").await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let builder = self
            .zone
            .request(Method::DELETE, &["os-volume-types", id], Accept::Json)?;
        self.zone.send_void(builder).await.false_on_not_found()
    }

    pub async fn get_extra_specs(&self, id: &str) -> Result<BTreeMap<String, String>> {
        let builder = self.zone.get(&["os-volume-types", id, "extra_specs"])?;
        self.zone.fetch(builder, "extra_specs").await.empty_on_not_found()
    }

    /// Merges `specs` into the type's extra specs.
    pub async fn update_extra_specs(
        &self,
        id: &str,
        specs: &BTreeMap<String, String>,
    ) -> Result<bool> {
        let builder = self
            .zone
            .request(Method::POST, &["os-volume-types", id, "extra_specs"], Accept::Json)?
            .payload(json_payload(json!({ "extra_specs": specs })));
        self.zone.send_void(builder).await.false_on_not_found()
    }

    pub async fn get_extra_spec(&self, id: &str, key: &str) -> Result<Option<String>> {
        let builder = self.zone.get(&["os-volume-types", id, "extra_specs", key])?;
        self.zone.fetch(builder, key).await.null_on_not_found()
    }

    pub async fn update_extra_spec(&self, id: &str, key: &str, value: &str) -> Result<bool> {
        let builder = self
            .zone
            .request(
                Method::PUT,
                &["os-volume-types", id, "extra_specs", key],
                Accept::Json,
            )?
            .payload(json_payload(json!({ key: value })));
        self.zone.send_void(builder).await.false_on_not_found()
    }

    pub async fn delete_extra_spec(&self, id: &str, key: &str) -> Result<bool> {
        let builder = self.zone.request(
            Method::DELETE,
            &["os-volume-types", id, "extra_specs", key],
            Accept::Json,
        )?;
        self.zone.send_void(builder).await.false_on_not_found()
    }
}
