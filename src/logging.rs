//! Tracing subscriber setup.
//!
//! Logs go to stderr so command output on stdout stays clean.

use crate::config::Config;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber using the configured level and format.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.log_format == "json" {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    }

    Ok(())
}
