//! Typed bindings for the REST APIs of CloudStack, OpenStack Nova and GleSYS.
//!
//! Each provider module has value types, options builders and one client per
//! feature area. Clients run over any [`core::HttpTransport`], which is how the
//! tests drive them with canned exchanges.

pub mod config;
pub mod context;
pub mod core;
pub mod providers;
pub mod utils;

pub use config::{ApiKind, CliConfig, ProviderConfig};
pub use context::{ApiContext, ProviderApi};
pub use core::{ExpectTransport, HttpRequest, HttpResponse, HttpTransport, RestClient};
pub use utils::error::{CloudError, Result};
