//! Wires a [`ProviderConfig`] to the bindings of the provider it names.

use crate::config::{ApiKind, ProviderConfig};
use crate::core::client::RestClient;
use crate::core::transport::ReqwestTransport;
use crate::providers::cloudstack::CloudStackApi;
use crate::providers::glesys::GlesysApi;
use crate::providers::nova::NovaApi;
use crate::utils::error::{CloudError, Result};
use crate::utils::validation::Validate;
use std::sync::Arc;
use tracing::info;

/// Root API of the configured provider.
#[derive(Debug, Clone)]
pub enum ProviderApi {
    CloudStack(CloudStackApi),
    Nova(NovaApi),
    Glesys(GlesysApi),
}

impl ProviderApi {
    pub fn kind(&self) -> ApiKind {
        match self {
            ProviderApi::CloudStack(_) => ApiKind::CloudStack,
            ProviderApi::Nova(_) => ApiKind::Nova,
            ProviderApi::Glesys(_) => ApiKind::Glesys,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiContext {
    api: ProviderApi,
}

impl ApiContext {
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        let transport = ReqwestTransport::new()
            .with_timeout(config.timeout())
            .with_user_agent(config.user_agent());
        let client = RestClient::new(Arc::new(transport)).with_wire_log(config.wire_log());

        let api = match config.api() {
            ApiKind::CloudStack => ProviderApi::CloudStack(CloudStackApi::new(
                client,
                config.endpoint()?,
                config.identity().map(str::to_string),
            )),
            ApiKind::Nova => ProviderApi::Nova(NovaApi::new(
                client,
                config.nova_zones(),
                required(config.credential(), "provider.credential")?,
            )),
            ApiKind::Glesys => ProviderApi::Glesys(GlesysApi::new(
                client,
                config.endpoint()?,
                required(config.identity(), "provider.identity")?,
                required(config.credential(), "provider.credential")?,
            )),
        };

        info!(api = ?api.kind(), "API context ready");
        Ok(Self { api })
    }

    pub fn api(&self) -> &ProviderApi {
        &self.api
    }

    pub fn into_api(self) -> ProviderApi {
        self.api
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value.ok_or_else(|| CloudError::MissingConfigError {
        field: field.to_string(),
    })
}
