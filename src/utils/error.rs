use crate::core::http::{HttpRequest, HttpResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource not found: {message}")]
    ResourceNotFound { message: String },

    #[error("Not authorized: {message}")]
    Authorization { message: String },

    #[error("Illegal state: {message}")]
    IllegalState { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("command: {request_line} failed with response: HTTP/1.1 {status} {message}")]
    HttpResponse {
        request_line: String,
        status: u16,
        message: String,
        body: Option<String>,
    },

    #[error("no expectation matched request: {request_line}{candidates}")]
    UnexpectedRequest {
        request_line: String,
        candidates: String,
    },

    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl CloudError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CloudError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Default status-code dispatch shared by every provider.
    pub fn from_status(request: &HttpRequest, response: &HttpResponse) -> Self {
        let message = Self::describe(request, response);
        match response.status {
            401 | 403 => CloudError::Authorization { message },
            404 => CloudError::ResourceNotFound { message },
            409 => CloudError::IllegalState { message },
            _ => Self::http_response(request, response),
        }
    }

    pub fn http_response(request: &HttpRequest, response: &HttpResponse) -> Self {
        CloudError::HttpResponse {
            request_line: request.request_line(),
            status: response.status,
            message: response.message.clone(),
            body: response.text().map(str::to_string),
        }
    }

    /// 組合錯誤訊息：優先使用回應內容，否則使用請求行
    pub fn describe(request: &HttpRequest, response: &HttpResponse) -> String {
        match response.text() {
            Some(body) if !body.trim().is_empty() => body.trim().to_string(),
            _ => format!(
                "{} -> HTTP/1.1 {} {}",
                request.request_line(),
                response.status,
                response.message
            )
            .trim_end()
            .to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CloudError::ResourceNotFound { .. })
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, CloudError::Authorization { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CloudError::HttpResponse { status, .. } => Some(*status),
            CloudError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn request() -> HttpRequest {
        HttpRequest::builder()
            .method(Method::GET)
            .endpoint("http://localhost:8080/client/api?command=listZones")
            .build()
            .unwrap()
    }

    #[test]
    fn test_status_dispatch() {
        let req = request();
        let not_found = HttpResponse::builder().status(404).build();
        let denied = HttpResponse::builder().status(401).build();
        let forbidden = HttpResponse::builder().status(403).build();
        let conflict = HttpResponse::builder().status(409).build();
        let broken = HttpResponse::builder().status(500).message("Server Error").build();

        assert!(CloudError::from_status(&req, &not_found).is_not_found());
        assert!(CloudError::from_status(&req, &denied).is_authorization());
        assert!(CloudError::from_status(&req, &forbidden).is_authorization());
        assert!(matches!(
            CloudError::from_status(&req, &conflict),
            CloudError::IllegalState { .. }
        ));
        let err = CloudError::from_status(&req, &broken);
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("HTTP/1.1 500 Server Error"));
    }

    #[test]
    fn test_message_prefers_body() {
        let req = request();
        let resp = HttpResponse::builder()
            .status(404)
            .payload_json("{\"error\":\"gone\"}")
            .build();
        match CloudError::from_status(&req, &resp) {
            CloudError::ResourceNotFound { message } => assert_eq!(message, "{\"error\":\"gone\"}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
