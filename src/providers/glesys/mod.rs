//! GleSYS bindings. Calls go to `{endpoint}/<module>/<action>/format/json`
//! with form-encoded parameters and HTTP Basic credentials, and answers are
//! wrapped as `{"response": {"status": {...}, "<key>": ...}}`.

pub mod domain;
pub mod domain_api;
pub mod email;
pub mod ip;
pub mod options;
pub mod server;

use crate::core::client::{ErrorHandler, RestClient};
use crate::core::http::{HttpRequest, HttpRequestBuilder, HttpResponse, APPLICATION_JSON};
use crate::core::transport::HttpTransport;
use crate::utils::error::{CloudError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

pub use domain_api::DomainApi;
pub use email::EmailAccountApi;
pub use ip::IpApi;
pub use server::ServerApi;

pub const DEFAULT_ENDPOINT: &str = "https://api.glesys.com";

#[derive(Debug, Clone, Copy, Default)]
pub struct GlesysErrorHandler;

impl ErrorHandler for GlesysErrorHandler {
    fn handle(&self, request: &HttpRequest, response: &HttpResponse) -> CloudError {
        let message = CloudError::describe(request, response);
        let missing = message.contains("not found") || message.contains("Could not find");
        match response.status {
            400 if missing => CloudError::ResourceNotFound { message },
            _ => CloudError::from_status(request, response),
        }
    }
}

/// Root of the GleSYS bindings; feature APIs are cheap clones of it.
#[derive(Debug, Clone)]
pub struct GlesysApi {
    client: RestClient,
    endpoint: String,
    authorization: String,
}

impl GlesysApi {
    pub fn new(
        client: RestClient,
        endpoint: impl Into<String>,
        identity: &str,
        credential: &str,
    ) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            client: client.with_error_handler(Arc::new(GlesysErrorHandler)),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            authorization: basic_authorization(identity, credential),
        }
    }

    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        endpoint: impl Into<String>,
        identity: &str,
        credential: &str,
    ) -> Self {
        Self::new(RestClient::new(transport), endpoint, identity, credential)
    }

    pub fn server_api(&self) -> ServerApi {
        ServerApi::new(self.clone())
    }

    pub fn domain_api(&self) -> DomainApi {
        DomainApi::new(self.clone())
    }

    pub fn ip_api(&self) -> IpApi {
        IpApi::new(self.clone())
    }

    pub fn email_account_api(&self) -> EmailAccountApi {
        EmailAccountApi::new(self.clone())
    }

    /// `segments` are the path between the endpoint and `format/json`.
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<HttpRequestBuilder> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            CloudError::invalid_argument(format!("invalid endpoint {}: {e}", self.endpoint))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                CloudError::invalid_argument(format!("endpoint {} cannot have a path", self.endpoint))
            })?
            .pop_if_empty()
            .extend(segments)
            .extend(["format", "json"]);
        Ok(HttpRequest::builder()
            .method(method)
            .endpoint(url.to_string())
            .add_header("Authorization", self.authorization.as_str()))
    }

    pub(crate) fn post(&self, segments: &[&str]) -> Result<HttpRequestBuilder> {
        Ok(self
            .request(Method::POST, segments)?
            .add_header("Accept", APPLICATION_JSON))
    }

    pub(crate) fn get(&self, segments: &[&str]) -> Result<HttpRequestBuilder> {
        Ok(self
            .request(Method::GET, segments)?
            .add_header("Accept", APPLICATION_JSON))
    }

    /// Invokes and deserializes `response.<key>`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        builder: HttpRequestBuilder,
        key: &str,
    ) -> Result<T> {
        let body: Value = self.client.invoke_json(builder.build()?).await?;
        Ok(serde_json::from_value(member(body, key)?)?)
    }

    /// Invokes and deserializes `response.<key>` when the answer has a body.
    pub(crate) async fn fetch_optional<T: DeserializeOwned>(
        &self,
        builder: HttpRequestBuilder,
        key: &str,
    ) -> Result<Option<T>> {
        let response = self.client.invoke(builder.build()?).await?;
        match response.non_empty_text() {
            Some(text) => {
                let body: Value = serde_json::from_str(text)?;
                Ok(Some(serde_json::from_value(member(body, key)?)?))
            }
            None => Ok(None),
        }
    }

    pub(crate) async fn send_void(&self, builder: HttpRequestBuilder) -> Result<()> {
        self.client.invoke_void(builder.build()?).await
    }
}

fn basic_authorization(identity: &str, credential: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{identity}:{credential}")))
}

fn member(mut body: Value, key: &str) -> Result<Value> {
    body.get_mut("response")
        .and_then(|response| response.get_mut(key))
        .map(Value::take)
        .ok_or_else(|| CloudError::IllegalState {
            message: format!("response has no {key} member"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::ExpectTransport;
    use serde_json::json;

    fn glesys() -> GlesysApi {
        GlesysApi::with_transport(
            Arc::new(ExpectTransport::new()),
            "https://api.glesys.com/",
            "identity",
            "credential",
        )
    }

    #[test]
    fn test_request_url_and_credentials() {
        let request = glesys()
            .get(&["ip", "details", "ipaddress", "31.192.227.113"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.request_line(),
            "GET https://api.glesys.com/ip/details/ipaddress/31.192.227.113/format/json HTTP/1.1"
        );
        assert_eq!(
            request.header("Authorization"),
            Some("Basic aWRlbnRpdHk6Y3JlZGVudGlhbA==")
        );
        assert_eq!(request.header("Accept"), Some("application/json"));
    }

    #[test]
    fn test_member_unwraps_response() {
        let body = json!({"response": {"status": {"code": 200}, "servers": []}});
        assert_eq!(member(body.clone(), "servers").unwrap(), json!([]));
        assert!(member(body, "server").is_err());
    }

    #[test]
    fn test_error_handler() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .endpoint("https://api.glesys.com/ip/take/format/json")
            .build()
            .unwrap();
        let handler = GlesysErrorHandler;
        let plain = |status: u16| HttpResponse::builder().status(status).build();
        let missing = HttpResponse::builder()
            .status(400)
            .payload_json(r#"{"response":{"status":{"code":400,"text":"Could not find server"}}}"#)
            .build();

        assert!(handler.handle(&request, &missing).is_not_found());
        assert!(matches!(
            handler.handle(&request, &plain(400)),
            CloudError::HttpResponse { status: 400, .. }
        ));
        assert!(handler.handle(&request, &plain(401)).is_authorization());
        assert!(handler.handle(&request, &plain(404)).is_not_found());
        assert!(matches!(handler.handle(&request, &plain(409)), CloudError::IllegalState { .. }));
        assert_eq!(handler.handle(&request, &plain(500)).status(), Some(500));
    }
}
