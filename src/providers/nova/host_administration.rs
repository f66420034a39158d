//! The `os-hosts` admin extension. Status and power calls answer whether the
//! host reports the requested state back; a missing host is an error.

use super::domain::{Host, HostResourceUsage};
use super::options::json_payload;
use super::{Accept, ZoneClient};
use crate::core::fallback::Fallback;
use crate::utils::error::Result;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
struct UsageRow {
    resource: HostResourceUsage,
}

#[derive(Debug, Clone)]
pub struct HostAdministrationApi {
    zone: ZoneClient,
}

impl HostAdministrationApi {
    pub(crate) fn new(zone: ZoneClient) -> Self {
        Self { zone }
    }

    pub async fn list(&self) -> Result<Vec<Host>> {
        let builder = self.zone.get(&["os-hosts"])?;
        self.zone.fetch(builder, "hosts").await.empty_on_not_found()
    }

    pub async fn list_resource_usage(&self, host: &str) -> Result<Vec<HostResourceUsage>> {
        let builder = self.zone.get(&["os-hosts", host])?;
        let rows: Vec<UsageRow> = self.zone.fetch(builder, "host").await.empty_on_not_found()?;
        Ok(rows.into_iter().map(|row| row.resource).collect())
    }

    pub async fn enable(&self, host: &str) -> Result<bool> {
        self.update(host, "status", "enable", "enabled").await
    }

    pub async fn disable(&self, host: &str) -> Result<bool> {
        self.update(host, "status", "disable", "disabled").await
    }

    pub async fn start_maintenance(&self, host: &str) -> Result<bool> {
        self.update(host, "maintenance_mode", "enable", "on_maintenance")
            .await
    }

    pub async fn stop_maintenance(&self, host: &str) -> Result<bool> {
        self.update(host, "maintenance_mode", "disable", "off_maintenance")
            .await
    }

    pub async fn startup(&self, host: &str) -> Result<bool> {
        self.power_action(host, "startup").await
    }

    pub async fn shutdown(&self, host: &str) -> Result<bool> {
        self.power_action(host, "shutdown").await
    }

    pub async fn reboot(&self, host: &str) -> Result<bool> {
        self.power_action(host, "reboot").await
    }

    async fn update(&self, host: &str, field: &str, value: &str, expected: &str) -> Result<bool> {
        info!(host, field, value, "Updating host");
        let builder = self
            .zone
            .request(Method::PUT, &["os-hosts", host], Accept::Json)?
            .payload(json_payload(json!({ field: value })));
        let reported: String = self.zone.fetch(builder, field).await?;
        Ok(reported == expected)
    }

    async fn power_action(&self, host: &str, action: &str) -> Result<bool> {
        info!(host, action, "Host power action");
        let builder = self.zone.get(&["os-hosts", host, action])?;
        let reported: String = self.zone.fetch(builder, "power_action").await?;
        Ok(reported == action)
    }
}
