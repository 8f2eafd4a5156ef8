//! Tracing setup for the `cashflow` binary

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::error::LedgerError;

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` wins over `default_filter`. A second call is a no-op.
pub fn init_tracing(default_filter: &str) -> Result<(), LedgerError> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(default_filter),
    }
    .map_err(|e| LedgerError::Config(format!("Invalid log filter: {}", e)))?;

    // Err only means a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    Ok(())
}
