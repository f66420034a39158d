use crate::core::http::{HttpRequest, HttpResponse};
use crate::core::transport::HttpTransport;
use crate::utils::error::{CloudError, Result};
use crate::utils::logger::WIRE_TARGET as WIRE;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Turns a non-2xx response into a typed error.
pub trait ErrorHandler: Send + Sync {
    fn handle(&self, request: &HttpRequest, response: &HttpResponse) -> CloudError;
}

/// 401/403, 404 and 409 dispatch; everything else is `HttpResponse`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn handle(&self, request: &HttpRequest, response: &HttpResponse) -> CloudError {
        CloudError::from_status(request, response)
    }
}

/// Shared by every feature API of one provider.
#[derive(Clone)]
pub struct RestClient {
    transport: Arc<dyn HttpTransport>,
    error_handler: Arc<dyn ErrorHandler>,
    wire_log: bool,
}

impl RestClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            error_handler: Arc::new(DefaultErrorHandler),
            wire_log: false,
        }
    }

    pub fn with_error_handler(mut self, error_handler: Arc<dyn ErrorHandler>) -> Self {
        self.error_handler = error_handler;
        self
    }

    pub fn with_wire_log(mut self, wire_log: bool) -> Self {
        self.wire_log = wire_log;
        self
    }

    pub async fn invoke(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.exchange(&request).await?;
        self.check(&request, response)
    }

    /// Like [`invoke`](Self::invoke), but a response with one of `absent`
    /// statuses answers `None` instead of going through the error handler.
    pub async fn invoke_unless(
        &self,
        request: HttpRequest,
        absent: &[u16],
    ) -> Result<Option<HttpResponse>> {
        let response = self.exchange(&request).await?;
        if absent.contains(&response.status) {
            tracing::debug!(
                target: WIRE,
                "{} answered {}, treated as absent",
                request.request_line(),
                response.status
            );
            return Ok(None);
        }
        self.check(&request, response).map(Some)
    }

    async fn exchange(&self, request: &HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(target: WIRE, ">> {}", request.request_line());
        if self.wire_log {
            if let Some(payload) = &request.payload {
                tracing::trace!(target: WIRE, ">> {}: {}", payload.content_type, payload.content);
            }
        }

        let response = self.transport.execute(request).await?;

        tracing::debug!(target: WIRE, "<< HTTP/1.1 {} {}", response.status, response.message);
        if self.wire_log {
            if let Some(body) = response.text() {
                tracing::trace!(target: WIRE, "<< {}", body);
            }
        }

        Ok(response)
    }

    fn check(&self, request: &HttpRequest, response: HttpResponse) -> Result<HttpResponse> {
        if response.is_success() {
            Ok(response)
        } else {
            let error = self.error_handler.handle(request, &response);
            tracing::debug!(target: WIRE, "{} failed: {}", request.request_line(), error);
            Err(error)
        }
    }

    pub async fn invoke_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let response = self.invoke(request).await?;
        let body = response.text().unwrap_or_default();
        Ok(serde_json::from_str(body)?)
    }

    pub async fn invoke_void(&self, request: HttpRequest) -> Result<()> {
        self.invoke(request).await.map(|_| ())
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("wire_log", &self.wire_log)
            .finish_non_exhaustive()
    }
}
