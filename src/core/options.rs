//! Options builders accumulate the optional parameters of one operation.
//!
//! Every provider options type wraps a [`BaseOptions`] and exposes chained
//! setters; the API method applies the accumulated pairs to its request.

use crate::core::http::{HttpRequestBuilder, Payload};

/// Ordered multimap of string pairs. `replace` keeps the position of the
/// first existing entry so the wire order stays stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap(Vec<(String, String)>);

impl ParamMap {
    pub fn replace(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.0[index].1 = value;
                let mut seen = false;
                self.0.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.0.push((key.to_string(), value)),
        }
    }

    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        self.0.push((key.to_string(), value.into()));
    }

    pub fn remove(&mut self, key: &str) {
        self.0.retain(|(k, _)| k != key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn values(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseOptions {
    query: ParamMap,
    form: ParamMap,
    headers: ParamMap,
    payload: Option<Payload>,
}

impl BaseOptions {
    pub fn replace_query(&mut self, key: &str, value: impl Into<String>) {
        self.query.replace(key, value);
    }

    pub fn add_query(&mut self, key: &str, value: impl Into<String>) {
        self.query.add(key, value);
    }

    pub fn query_values(&self, key: &str) -> Vec<&str> {
        self.query.values(key)
    }

    pub fn contains_query(&self, key: &str) -> bool {
        self.query.contains(key)
    }

    pub fn query(&self) -> &ParamMap {
        &self.query
    }

    pub fn replace_form(&mut self, key: &str, value: impl Into<String>) {
        self.form.replace(key, value);
    }

    pub fn add_form(&mut self, key: &str, value: impl Into<String>) {
        self.form.add(key, value);
    }

    pub fn form_values(&self, key: &str) -> Vec<&str> {
        self.form.values(key)
    }

    pub fn contains_form(&self, key: &str) -> bool {
        self.form.contains(key)
    }

    pub fn form(&self) -> &ParamMap {
        &self.form
    }

    pub fn replace_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.replace(name, value);
    }

    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers.values(name)
    }

    pub fn set_payload(&mut self, payload: Payload) {
        self.payload = Some(payload);
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// 將累積的參數套用到請求上
    pub fn apply_to(&self, mut builder: HttpRequestBuilder) -> HttpRequestBuilder {
        for (key, value) in self.query.iter() {
            builder = builder.add_query_param(key, value);
        }
        for (key, value) in self.form.iter() {
            builder = builder.add_form_param(key, value);
        }
        for (name, value) in self.headers.iter() {
            builder = builder.replace_header(name, value);
        }
        if let Some(payload) = &self.payload {
            builder = builder.payload(payload.clone());
        }
        builder
    }
}

/// Implemented by every options builder.
pub trait RequestOptions {
    fn base(&self) -> &BaseOptions;

    fn apply_to(&self, builder: HttpRequestBuilder) -> HttpRequestBuilder {
        self.base().apply_to(builder)
    }

    fn query_values(&self, key: &str) -> Vec<&str> {
        self.base().query_values(key)
    }

    fn form_values(&self, key: &str) -> Vec<&str> {
        self.base().form_values(key)
    }
}

impl RequestOptions for BaseOptions {
    fn base(&self) -> &BaseOptions {
        self
    }
}

/// Declares options builders: a struct wrapping [`BaseOptions`] plus its
/// [`RequestOptions`] impl. Setters are written by hand next to it.
#[macro_export]
macro_rules! request_options {
    ($($(#[$meta:meta])* $vis:vis struct $name:ident;)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq, Eq)]
            $vis struct $name {
                base: $crate::core::options::BaseOptions,
            }

            impl $name {
                pub fn new() -> Self {
                    Self::default()
                }
            }

            impl $crate::core::options::RequestOptions for $name {
                fn base(&self) -> &$crate::core::options::BaseOptions {
                    &self.base
                }
            }
        )+
    };
}

/// Joins values the way list-valued parameters are sent ("a,b,c").
pub fn join_comma<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::HttpRequest;

    #[test]
    fn test_replace_keeps_position_and_single_value() {
        let mut params = ParamMap::default();
        params.add("a", "1");
        params.add("b", "2");
        params.add("a", "3");
        params.replace("a", "4");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "4"), ("b", "2")]);
    }

    #[test]
    fn test_apply_to_request() {
        let mut options = BaseOptions::default();
        options.replace_query("zoneid", "3");
        options.add_query("tags", "a");
        options.add_query("tags", "b");

        let request = options
            .apply_to(HttpRequest::builder().endpoint("http://localhost/api"))
            .build()
            .unwrap();

        assert_eq!(
            request.request_line(),
            "GET http://localhost/api?zoneid=3&tags=a&tags=b HTTP/1.1"
        );
    }

    #[test]
    fn test_form_options_become_form_payload() {
        let mut options = BaseOptions::default();
        options.replace_form("description", "web head");
        options.replace_form("cpucores", "2");

        let request = options
            .apply_to(HttpRequest::builder().endpoint("https://api.glesys.com/server/edit/format/json"))
            .build()
            .unwrap();

        assert_eq!(request.form_values("description"), vec!["web head"]);
        assert_eq!(request.form_values("cpucores"), vec!["2"]);
    }

    #[test]
    fn test_join_comma() {
        assert_eq!(join_comma(["5", "6"]), "5,6");
        assert_eq!(join_comma(Vec::<String>::new()), "");
    }
}
