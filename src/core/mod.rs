pub mod client;
pub mod fallback;
pub mod http;
pub mod json;
pub mod options;
pub mod transport;

pub use client::{DefaultErrorHandler, ErrorHandler, RestClient};
pub use fallback::Fallback;
pub use http::{HttpRequest, HttpResponse, Payload};
pub use options::{BaseOptions, RequestOptions};
pub use transport::{ExpectTransport, HttpTransport, ReqwestTransport};
