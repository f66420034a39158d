//! Plain value types for one HTTP exchange.
//!
//! Requests are built up front and compared by value, so the same
//! [`HttpRequest`] is what the real transport sends and what an expect test
//! asserts against.

use crate::utils::error::{CloudError, Result};
use reqwest::Method;
use std::collections::BTreeMap;
use std::fmt;
use url::{form_urlencoded, Url};

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_FORM: &str = "application/x-www-form-urlencoded";
pub const TEXT_PLAIN: &str = "text/plain";

/// Header multimap. Names keep the case they were added with.
pub type Headers = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Eq)]
pub struct Payload {
    pub content: String,
    pub content_type: String,
}

impl Payload {
    pub fn json(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: APPLICATION_JSON.to_string(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: TEXT_PLAIN.to_string(),
        }
    }

    pub fn form<K, V>(pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        Self {
            content: serializer.finish(),
            content_type: APPLICATION_FORM.to_string(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.content_type.starts_with(APPLICATION_JSON)
    }

    /// Decoded form pairs, in wire order.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(self.content.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

// JSON bodies compare structurally so key order never matters.
impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        if self.is_json() && other.is_json() {
            if let (Ok(a), Ok(b)) = (
                serde_json::from_str::<serde_json::Value>(&self.content),
                serde_json::from_str::<serde_json::Value>(&other.content),
            ) {
                return a == b;
            }
        }
        self.content_type == other.content_type && self.content == other.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub endpoint: Url,
    pub headers: Headers,
    pub payload: Option<Payload>,
}

impl HttpRequest {
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    pub fn request_line(&self) -> String {
        format!("{} {} HTTP/1.1", self.method, self.endpoint)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        first_header(&self.headers, name)
    }

    /// Decoded query pairs, in wire order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.endpoint
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn query_values(&self, key: &str) -> Vec<String> {
        self.query_pairs()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn form_values(&self, key: &str) -> Vec<String> {
        self.payload
            .as_ref()
            .filter(|p| p.content_type == APPLICATION_FORM)
            .map(|p| {
                p.form_pairs()
                    .into_iter()
                    .filter(|(k, _)| k == key)
                    .map(|(_, v)| v)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.request_line())
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpRequestBuilder {
    method: Option<Method>,
    endpoint: Option<String>,
    query: Vec<(String, String)>,
    headers: Headers,
    form: Vec<(String, String)>,
    payload: Option<Payload>,
}

impl HttpRequestBuilder {
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn add_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn replace_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.query.retain(|(k, _)| *k != key);
        self.query.push((key, value.into()));
        self
    }

    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.entry(name.into()).or_default().push(value.into());
        self
    }

    pub fn replace_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), vec![value.into()]);
        self
    }

    pub fn add_form_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    pub fn replace_form_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.form.retain(|(k, _)| *k != key);
        self.form.push((key, value.into()));
        self
    }

    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn build(self) -> Result<HttpRequest> {
        let raw = self
            .endpoint
            .ok_or_else(|| CloudError::invalid_argument("endpoint"))?;
        let mut endpoint = Url::parse(&raw)
            .map_err(|e| CloudError::invalid_argument(format!("invalid endpoint {raw}: {e}")))?;

        if !self.query.is_empty() {
            let mut query = endpoint.query().unwrap_or_default().to_string();
            for (key, value) in &self.query {
                if !query.is_empty() {
                    query.push('&');
                }
                query.push_str(&encode_query_component(key));
                query.push('=');
                query.push_str(&encode_query_component(value));
            }
            endpoint.set_query(Some(&query));
        }

        let payload = match (self.payload, self.form.is_empty()) {
            (Some(_), false) => {
                return Err(CloudError::invalid_argument(
                    "a request cannot carry both form parameters and a payload",
                ))
            }
            (Some(payload), true) => Some(payload),
            (None, false) => Some(Payload::form(&self.form)),
            (None, true) => None,
        };

        Ok(HttpRequest {
            method: self.method.unwrap_or(Method::GET),
            endpoint,
            headers: self.headers,
            payload,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub message: String,
    pub headers: Headers,
    pub payload: Option<Payload>,
}

impl HttpResponse {
    pub fn builder() -> HttpResponseBuilder {
        HttpResponseBuilder::default()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        first_header(&self.headers, name)
    }

    pub fn text(&self) -> Option<&str> {
        self.payload.as_ref().map(|p| p.content.as_str())
    }

    /// Body text when present and not blank.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text().filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponseBuilder {
    status: u16,
    message: String,
    headers: Headers,
    payload: Option<Payload>,
}

impl Default for HttpResponseBuilder {
    fn default() -> Self {
        Self {
            status: 200,
            message: String::new(),
            headers: Headers::new(),
            payload: None,
        }
    }
}

impl HttpResponseBuilder {
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.entry(name.into()).or_default().push(value.into());
        self
    }

    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn payload_json(self, content: impl Into<String>) -> Self {
        self.payload(Payload::json(content))
    }

    pub fn build(self) -> HttpResponse {
        HttpResponse {
            status: self.status,
            message: self.message,
            headers: self.headers,
            payload: self.payload,
        }
    }
}

/// Form encoding, except a space is `%20` rather than `+`. A literal `+`
/// is already `%2B` by then, so every `+` left stands for a space.
fn encode_query_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn first_header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line_includes_query() {
        let request = HttpRequest::builder()
            .endpoint("http://localhost:8080/client/api")
            .add_query_param("response", "json")
            .add_query_param("command", "listTemplates")
            .add_query_param("listAll", "true")
            .build()
            .unwrap();

        assert_eq!(
            request.request_line(),
            "GET http://localhost:8080/client/api?response=json&command=listTemplates&listAll=true HTTP/1.1"
        );
    }

    #[test]
    fn test_space_in_query_value_is_percent_encoded() {
        let request = HttpRequest::builder()
            .endpoint("http://localhost:8080/client/api")
            .add_query_param("command", "createSecurityGroup")
            .add_query_param("name", "web tier")
            .add_query_param("description", "a+b c")
            .build()
            .unwrap();

        assert_eq!(
            request.request_line(),
            "GET http://localhost:8080/client/api?command=createSecurityGroup&name=web%20tier&description=a%2Bb%20c HTTP/1.1"
        );
        assert_eq!(request.query_values("name"), vec!["web tier"]);
        assert_eq!(request.query_values("description"), vec!["a+b c"]);
    }

    #[test]
    fn test_query_params_follow_endpoint_query() {
        let request = HttpRequest::builder()
            .endpoint("http://localhost:8080/client/api?response=json")
            .add_query_param("usersecuritygrouplist[0].account", "adrian")
            .build()
            .unwrap();

        assert_eq!(
            request.request_line(),
            "GET http://localhost:8080/client/api?response=json&usersecuritygrouplist%5B0%5D.account=adrian HTTP/1.1"
        );
        assert_eq!(
            request.query_values("usersecuritygrouplist[0].account"),
            vec!["adrian"]
        );
    }

    #[test]
    fn test_replace_query_param_keeps_single_value() {
        let request = HttpRequest::builder()
            .endpoint("http://localhost/api")
            .add_query_param("id", "1")
            .replace_query_param("id", "2")
            .build()
            .unwrap();
        assert_eq!(request.query_values("id"), vec!["2"]);
    }

    #[test]
    fn test_form_params_become_payload() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .endpoint("https://api.glesys.com/server/details/format/json")
            .add_form_param("serverid", "xm3276891")
            .add_form_param("includestate", "true")
            .build()
            .unwrap();

        let payload = request.payload.as_ref().unwrap();
        assert_eq!(payload.content_type, APPLICATION_FORM);
        assert_eq!(payload.content, "serverid=xm3276891&includestate=true");
        assert_eq!(request.form_values("serverid"), vec!["xm3276891"]);
    }

    #[test]
    fn test_form_and_payload_are_exclusive() {
        let result = HttpRequest::builder()
            .endpoint("http://localhost/api")
            .add_form_param("a", "b")
            .payload(Payload::json("{}"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_endpoint_is_rejected() {
        assert!(HttpRequest::builder().build().is_err());
    }

    #[test]
    fn test_json_payload_equality_ignores_key_order() {
        let a = Payload::json("{\"server\":{\"name\":\"a\",\"imageRef\":\"1\"}}");
        let b = Payload::json("{\"server\": {\"imageRef\": \"1\", \"name\": \"a\"}}");
        assert_eq!(a, b);
        assert_ne!(a, Payload::text("{\"server\":{\"name\":\"a\",\"imageRef\":\"1\"}}"));
    }

    #[test]
    fn test_response_header_lookup_is_case_insensitive() {
        let response = HttpResponse::builder()
            .status(202)
            .add_header("Location", "https://nova/v1.1/3456/images/52415800")
            .build();
        assert!(response.is_success());
        assert_eq!(
            response.header("location"),
            Some("https://nova/v1.1/3456/images/52415800")
        );
    }
}
