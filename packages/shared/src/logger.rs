//! Logging setup utilities for the Telecare services.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Every crate of the workspace, the binary itself and `tower_http` (request
/// traces) log at `default_log_level`.
pub fn default_filter_directive(binary_name: &str, default_log_level: &str) -> String {
    [
        "telecare_server",
        "telecare_shared",
        &binary_name.replace('-', "_"),
        "tower_http",
    ]
    .iter()
    .map(|target| format!("{}={}", target, default_log_level))
    .collect::<Vec<_>>()
    .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "telecare-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use telecare_shared::logger::setup_logger;
///
/// setup_logger("telecare-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter_directive(binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
