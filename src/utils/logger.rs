//! Subscriber setup for the CLI.
//!
//! HTTP exchanges log under [`WIRE_TARGET`]: request and status lines at
//! debug, bodies at trace (only when the client has wire logging on). They
//! stay quiet unless asked for, whatever the crate level is.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const WIRE_TARGET: &str = "cloud_apis::wire";

/// Filter used when `RUST_LOG` is unset.
pub fn default_directives(verbose: bool, wire_bodies: bool) -> String {
    let crate_level = if verbose { "debug" } else { "info" };
    let wire_level = match (verbose, wire_bodies) {
        (_, true) => "trace",
        (true, false) => "debug",
        (false, false) => "warn",
    };
    let mut directives = format!("cloud_apis={crate_level},{WIRE_TARGET}={wire_level}");
    if verbose {
        // 其他 crate 也輸出 info
        directives.push_str(",info");
    }
    directives
}

fn env_filter(verbose: bool, wire_bodies: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, wire_bodies)))
}

pub fn init_cli_logger(verbose: bool, wire_bodies: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose, wire_bodies))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines keep the target so wire records can be told apart downstream.
pub fn init_json_logger(wire_bodies: bool) {
    tracing_subscriber::registry()
        .with(env_filter(false, wire_bodies))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
