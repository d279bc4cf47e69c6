//! Logger setup for workspace binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The default filter enables `default_level` for the given binary target
/// and for `tower_http` request traces. Setting `RUST_LOG` overrides the
/// default filter entirely.
///
/// # Arguments
///
/// * `name` - Binary name (pass `env!("CARGO_BIN_NAME")`)
/// * `default_level` - Log level used when `RUST_LOG` is not set
pub fn setup_logger(name: &str, default_level: &str) {
    // Cargo bin names use hyphens; tracing targets use underscores
    let target = name.replace('-', "_");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{target}={default_level},tower_http={default_level}"
        ))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::debug!("Logger initialized for '{}'", name);
}
