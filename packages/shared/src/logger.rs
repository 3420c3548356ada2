//! Logging setup utilities for the Parley relay.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Crate names are normalised the way `tracing` reports targets (`-` becomes `_`).
pub fn default_directive(crate_names: &[&str], default_log_level: &str) -> String {
    crate_names
        .iter()
        .map(|name| format!("{}={}", name.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// Logging is enabled for the shared crate, the server library, HTTP tracing and the binary.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "parley-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use parley_shared::logger::setup_logger;
///
/// setup_logger("parley-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    let directive = default_directive(
        &[
            env!("CARGO_PKG_NAME"),
            "parley_server",
            "tower_http",
            binary_name,
        ],
        default_log_level,
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| directive.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
