//! OpenStack Nova compute bindings, one endpoint per configured zone.
//!
//! Requests carry `X-Auth-Token` with the configured credential. Answers wrap
//! the resource in a single key such as `{"server": {...}}`.

pub mod admin_actions;
pub mod domain;
pub mod host_administration;
pub mod image;
pub mod options;
pub mod security_group;
pub mod server;
pub mod volume;
pub mod volume_type;

use crate::core::client::{ErrorHandler, RestClient};
use crate::core::http::{HttpRequest, HttpRequestBuilder, HttpResponse, APPLICATION_JSON};
use crate::core::transport::HttpTransport;
use crate::utils::error::{CloudError, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

pub use admin_actions::AdminActionsApi;
pub use host_administration::HostAdministrationApi;
pub use image::ImageApi;
pub use security_group::SecurityGroupApi;
pub use server::ServerApi;
pub use volume::VolumeApi;
pub use volume_type::VolumeTypeApi;

pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Clone, Copy, Default)]
pub struct NovaErrorHandler;

impl ErrorHandler for NovaErrorHandler {
    fn handle(&self, request: &HttpRequest, response: &HttpResponse) -> CloudError {
        let message = CloudError::describe(request, response);
        match response.status {
            400 => CloudError::InvalidArgument { message },
            401 | 403 => CloudError::Authorization { message },
            404 => CloudError::ResourceNotFound { message },
            409 => CloudError::IllegalState { message },
            // over limit
            413 => CloudError::IllegalState { message },
            _ => CloudError::http_response(request, response),
        }
    }
}

/// Root of the Nova bindings. Feature APIs exist per zone.
#[derive(Debug, Clone)]
pub struct NovaApi {
    client: RestClient,
    zones: BTreeMap<String, String>,
    token: String,
}

impl NovaApi {
    pub fn new(client: RestClient, zones: BTreeMap<String, String>, token: impl Into<String>) -> Self {
        Self {
            client: client.with_error_handler(Arc::new(NovaErrorHandler)),
            zones,
            token: token.into(),
        }
    }

    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        zones: BTreeMap<String, String>,
        token: impl Into<String>,
    ) -> Self {
        Self::new(RestClient::new(transport), zones, token)
    }

    pub fn configured_zones(&self) -> Vec<&str> {
        self.zones.keys().map(String::as_str).collect()
    }

    pub fn server_api(&self, zone: &str) -> Option<ServerApi> {
        self.zone(zone).map(ServerApi::new)
    }

    pub fn image_api(&self, zone: &str) -> Option<ImageApi> {
        self.zone(zone).map(ImageApi::new)
    }

    pub fn volume_api(&self, zone: &str) -> Option<VolumeApi> {
        self.zone(zone).map(VolumeApi::new)
    }

    pub fn security_group_api(&self, zone: &str) -> Option<SecurityGroupApi> {
        self.zone(zone).map(SecurityGroupApi::new)
    }

    pub fn admin_actions_api(&self, zone: &str) -> Option<AdminActionsApi> {
        self.zone(zone).map(AdminActionsApi::new)
    }

    pub fn host_administration_api(&self, zone: &str) -> Option<HostAdministrationApi> {
        self.zone(zone).map(HostAdministrationApi::new)
    }

    pub fn volume_type_api(&self, zone: &str) -> Option<VolumeTypeApi> {
        self.zone(zone).map(VolumeTypeApi::new)
    }

    fn zone(&self, zone: &str) -> Option<ZoneClient> {
        self.zones.get(zone).map(|endpoint| ZoneClient {
            client: self.client.clone(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: self.token.clone(),
        })
    }
}

/// What `Accept` header a call sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Accept {
    Json,
    Any,
    Omitted,
}

/// Client bound to one zone's compute endpoint.
#[derive(Debug, Clone)]
pub(crate) struct ZoneClient {
    client: RestClient,
    endpoint: String,
    token: String,
}

impl ZoneClient {
    /// Appends percent-encoded path segments to the zone endpoint.
    fn url(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            CloudError::invalid_argument(format!("invalid endpoint {}: {e}", self.endpoint))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                CloudError::invalid_argument(format!("endpoint {} cannot have a path", self.endpoint))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }

    pub(crate) fn request(
        &self,
        method: Method,
        segments: &[&str],
        accept: Accept,
    ) -> Result<HttpRequestBuilder> {
        let builder = HttpRequest::builder()
            .method(method)
            .endpoint(self.url(segments)?);
        let builder = match accept {
            Accept::Json => builder.add_header("Accept", APPLICATION_JSON),
            Accept::Any => builder.add_header("Accept", "*/*"),
            Accept::Omitted => builder,
        };
        Ok(builder.add_header(AUTH_TOKEN_HEADER, self.token.as_str()))
    }

    pub(crate) fn get(&self, segments: &[&str]) -> Result<HttpRequestBuilder> {
        self.request(Method::GET, segments, Accept::Json)
    }

    pub(crate) async fn send(&self, builder: HttpRequestBuilder) -> Result<HttpResponse> {
        self.client.invoke(builder.build()?).await
    }

    pub(crate) async fn send_void(&self, builder: HttpRequestBuilder) -> Result<()> {
        self.client.invoke_void(builder.build()?).await
    }

    /// Invokes and deserializes the member `key` of the answer.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        builder: HttpRequestBuilder,
        key: &str,
    ) -> Result<T> {
        let mut body: Value = self.client.invoke_json(builder.build()?).await?;
        match body.get_mut(key).map(Value::take) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(CloudError::IllegalState {
                message: format!("response has no {key} member"),
            }),
        }
    }
}

impl ZoneClient {
    /// Deserializes the whole answer, or `None` on one of `absent` statuses.
    pub(crate) async fn fetch_unless<T: DeserializeOwned>(
        &self,
        builder: HttpRequestBuilder,
        absent: &[u16],
    ) -> Result<Option<T>> {
        let Some(response) = self.client.invoke_unless(builder.build()?, absent).await? else {
            return Ok(None);
        };
        let body = response.text().unwrap_or_default();
        Ok(Some(serde_json::from_str(body)?))
    }
}

/// Id of the resource a `Location` header points at.
pub(crate) fn id_from_location(response: &HttpResponse) -> Result<String> {
    response
        .header("Location")
        .and_then(|location| location.trim_end_matches('/').rsplit('/').next())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CloudError::IllegalState {
            message: format!("HTTP/1.1 {} without a Location header", response.status),
        })
}
