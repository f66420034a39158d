use crate::core::http::{Headers, HttpRequest, HttpResponse, Payload};
use crate::utils::error::{CloudError, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::sync::Mutex;
use std::time::Duration;

/// Sends one request and returns the raw response, whatever its status.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            timeout: None,
            user_agent: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        // 構建請求
        let mut builder = self
            .client
            .request(request.method.clone(), request.endpoint.clone());

        for (name, values) in &request.headers {
            for value in values {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }

        if let Some(user_agent) = &self.user_agent {
            builder = builder.header(USER_AGENT, user_agent.as_str());
        }

        if let Some(payload) = &request.payload {
            builder = builder
                .header(CONTENT_TYPE, payload.content_type.as_str())
                .body(payload.content.clone());
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;

        let status = response.status();
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers
                    .entry(canonical_header_name(name.as_str()))
                    .or_default()
                    .push(value.to_string());
            }
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await?;
        let payload = if body.is_empty() {
            None
        } else {
            Some(Payload {
                content: body,
                content_type: content_type.unwrap_or_else(|| "application/unknown".to_string()),
            })
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            payload,
        })
    }
}

/// "content-type" -> "Content-Type"
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Replays canned responses for exactly-matching requests.
///
/// This is the harness behind every expect test: a client wired to an
/// `ExpectTransport` must produce byte-for-byte the request the test
/// declared, otherwise the call fails with [`CloudError::UnexpectedRequest`].
#[derive(Debug, Default)]
pub struct ExpectTransport {
    expectations: Vec<(HttpRequest, HttpResponse)>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ExpectTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect(mut self, request: HttpRequest, response: HttpResponse) -> Self {
        self.expectations.push((request, response));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    fn candidates(&self, request: &HttpRequest) -> String {
        let similar: Vec<String> = self
            .expectations
            .iter()
            .map(|(expected, _)| expected)
            .filter(|expected| {
                expected.method == request.method && expected.endpoint.path() == request.endpoint.path()
            })
            .map(|expected| {
                format!(
                    "\n  expected: {} headers={:?} payload={:?}",
                    expected.request_line(),
                    expected.headers,
                    expected.payload.as_ref().map(|p| &p.content)
                )
            })
            .collect();

        if similar.is_empty() {
            String::new()
        } else {
            format!(
                "\n  actual:   {} headers={:?} payload={:?}{}",
                request.request_line(),
                request.headers,
                request.payload.as_ref().map(|p| &p.content),
                similar.join("")
            )
        }
    }
}

#[async_trait]
impl HttpTransport for ExpectTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.clone());
        }

        self.expectations
            .iter()
            .find(|(expected, _)| expected == request)
            .map(|(_, response)| response.clone())
            .ok_or_else(|| CloudError::UnexpectedRequest {
                request_line: request.request_line(),
                candidates: self.candidates(request),
            })
    }
}
