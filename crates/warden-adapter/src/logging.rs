//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;
use warden_core::{WardenError, WardenResult};

/// Install a global fmt subscriber
///
/// `filter` takes precedence; when empty, `RUST_LOG` is used, then `info`.
/// Fails if the directive does not parse or a global subscriber is already set.
pub fn init_tracing(filter: &str) -> WardenResult<()> {
    let filter = parse_filter(filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .try_init()
        .map_err(|e| WardenError::config(format!("Failed to install tracing subscriber: {e}")))
}

/// Build the `EnvFilter` for a configured directive
///
/// An empty directive defers to `RUST_LOG`, then `info`.
pub fn parse_filter(filter: &str) -> WardenResult<EnvFilter> {
    if filter.trim().is_empty() {
        return Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));
    }
    EnvFilter::try_new(filter)
        .map_err(|e| WardenError::config(format!("Invalid log filter {filter:?}: {e}")))
}
