//! CloudStack: every call is `GET {endpoint}?response=json&command=<name>`,
//! and every answer is wrapped in `{"<name lowercased>response": {...}}`.

pub mod address;
pub mod domain;
pub mod firewall;
pub mod iso;
pub mod options;
pub mod security_group;
pub mod template;
pub mod virtual_machine;
pub mod volume;

use crate::core::client::{ErrorHandler, RestClient};
use crate::core::http::{HttpRequest, HttpRequestBuilder, HttpResponse, APPLICATION_JSON};
use crate::core::transport::HttpTransport;
use crate::utils::error::{CloudError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

pub use address::AddressApi;
pub use firewall::FirewallApi;
pub use iso::ISOApi;
pub use security_group::SecurityGroupApi;
pub use template::TemplateApi;
pub use virtual_machine::VirtualMachineApi;
pub use volume::VolumeApi;

#[derive(Debug, Clone, Copy, Default)]
pub struct CloudStackErrorHandler;

impl ErrorHandler for CloudStackErrorHandler {
    fn handle(&self, request: &HttpRequest, response: &HttpResponse) -> CloudError {
        let message = CloudError::describe(request, response);
        match response.status {
            400 | 405 => CloudError::InvalidArgument { message },
            401 | 531 => CloudError::Authorization { message },
            404 => CloudError::ResourceNotFound { message },
            431 if message.contains("does not exist") => CloudError::ResourceNotFound { message },
            409 | 431 => CloudError::IllegalState { message },
            _ => CloudError::http_response(request, response),
        }
    }
}

/// Root of the CloudStack bindings; feature APIs are cheap clones of it.
#[derive(Debug, Clone)]
pub struct CloudStackApi {
    client: RestClient,
    endpoint: String,
    api_key: Option<String>,
}

impl CloudStackApi {
    pub fn new(client: RestClient, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: client.with_error_handler(Arc::new(CloudStackErrorHandler)),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        endpoint: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self::new(RestClient::new(transport), endpoint, api_key)
    }

    pub fn virtual_machine_api(&self) -> VirtualMachineApi {
        VirtualMachineApi::new(self.clone())
    }

    pub fn template_api(&self) -> TemplateApi {
        TemplateApi::new(self.clone())
    }

    pub fn firewall_api(&self) -> FirewallApi {
        FirewallApi::new(self.clone())
    }

    pub fn address_api(&self) -> AddressApi {
        AddressApi::new(self.clone())
    }

    pub fn volume_api(&self) -> VolumeApi {
        VolumeApi::new(self.clone())
    }

    pub fn security_group_api(&self) -> SecurityGroupApi {
        SecurityGroupApi::new(self.clone())
    }

    pub fn iso_api(&self) -> ISOApi {
        ISOApi::new(self.clone())
    }

    pub(crate) fn command(&self, name: &str) -> HttpRequestBuilder {
        HttpRequest::builder()
            .endpoint(self.endpoint.clone())
            .add_query_param("response", "json")
            .add_query_param("command", name)
    }

    pub(crate) fn list_command(&self, name: &str) -> HttpRequestBuilder {
        self.command(name).add_query_param("listAll", "true")
    }

    fn finish(&self, builder: HttpRequestBuilder) -> Result<HttpRequest> {
        match &self.api_key {
            Some(key) => builder.add_query_param("apiKey", key.as_str()).build(),
            None => builder.build(),
        }
    }

    /// Invokes `command` and returns the body found under its response key.
    pub(crate) async fn call_value(&self, command: &str, builder: HttpRequestBuilder) -> Result<Value> {
        let request = self.finish(builder.add_header("Accept", APPLICATION_JSON))?;
        let body: Value = self.client.invoke_json(request).await?;
        Ok(unwrap_response(body, command))
    }

    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        command: &str,
        builder: HttpRequestBuilder,
    ) -> Result<T> {
        let value = self.call_value(command, builder).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// List commands carry their collection under the singular resource key.
    pub(crate) async fn call_list<T: DeserializeOwned>(
        &self,
        command: &str,
        key: &str,
        builder: HttpRequestBuilder,
    ) -> Result<Vec<T>> {
        let value = self.call_value(command, builder).await?;
        list_under(value, key)
    }

    /// Single-resource answers like `{"template": [{...}]}` or `{"template": {...}}`.
    pub(crate) async fn call_named<T: DeserializeOwned>(
        &self,
        command: &str,
        key: &str,
        builder: HttpRequestBuilder,
    ) -> Result<Option<T>> {
        let mut items = self.call_list(command, key, builder).await?;
        Ok(if items.is_empty() {
            None
        } else {
            Some(items.swap_remove(0))
        })
    }

    /// Like [`Self::call_named`] but an absent resource is an error.
    pub(crate) async fn call_one<T: DeserializeOwned>(
        &self,
        command: &str,
        key: &str,
        builder: HttpRequestBuilder,
    ) -> Result<T> {
        self.call_named(command, key, builder)
            .await?
            .ok_or_else(|| CloudError::ResourceNotFound {
                message: format!("{command} answered without a {key}"),
            })
    }

    /// Sent without `Accept`; the body is discarded.
    pub(crate) async fn call_void(&self, builder: HttpRequestBuilder) -> Result<()> {
        let request = self.finish(builder)?;
        self.client.invoke_void(request).await
    }
}

/// `{"listtemplatesresponse": X}` -> `X`. Falls back to the only member when
/// the server names the wrapper differently.
pub(crate) fn unwrap_response(body: Value, command: &str) -> Value {
    let key = format!("{}response", command.to_lowercase());
    match body {
        Value::Object(mut map) => {
            if let Some(inner) = map.remove(&key) {
                inner
            } else if map.len() == 1 {
                map.into_iter().next().map(|(_, v)| v).unwrap_or(Value::Null)
            } else {
                Value::Object(map)
            }
        }
        other => other,
    }
}

pub(crate) fn list_under<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).map_err(CloudError::from))
            .collect(),
        Some(single) => Ok(vec![serde_json::from_value(single.clone())?]),
    }
}
