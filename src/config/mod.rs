pub mod toml_config;

pub use toml_config::{ApiKind, ProviderConfig};

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "cloud-apis"))]
#[cfg_attr(feature = "cli", command(about = "Query a cloud provider through its REST API"))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Provider configuration file
    #[cfg_attr(feature = "cli", arg(short, long, default_value = "provider.toml"))]
    pub config: String,

    /// Nova zone to query; the first configured zone otherwise
    #[cfg_attr(feature = "cli", arg(long))]
    pub zone: Option<String>,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    /// Log as JSON lines instead of the compact format
    #[cfg_attr(feature = "cli", arg(long))]
    pub json_logs: bool,

    #[cfg_attr(feature = "cli", command(subcommand))]
    pub command: Command,
}

#[cfg_attr(feature = "cli", derive(Subcommand))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// List servers or virtual machines
    Servers,
    /// List templates or images
    Templates,
    /// Show one server or virtual machine
    Describe {
        /// Provider id of the server
        id: String,
    },
}
