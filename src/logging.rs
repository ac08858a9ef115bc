//! Logging Setup
//!
//! Builds the tracing subscriber from [`LoggingConfig`]: level from config
//! with `RUST_LOG` taking precedence, output format switchable between
//! compact, pretty and JSON.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber
///
/// # Errors
///
/// Returns an error if the configured level or format is invalid, or if a
/// global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level: Level = config
        .level
        .to_lowercase()
        .parse()
        .map_err(|e| anyhow!("Failed to parse log level '{}': {}", config.level, e))?;

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.format.to_lowercase().as_str() {
        "json" => builder
            .json()
            .try_init()
            .map_err(|e| anyhow!("Failed to install subscriber: {}", e))?,
        "pretty" => builder
            .pretty()
            .try_init()
            .map_err(|e| anyhow!("Failed to install subscriber: {}", e))?,
        "compact" => builder
            .compact()
            .try_init()
            .map_err(|e| anyhow!("Failed to install subscriber: {}", e))?,
        other => return Err(anyhow!("Unsupported log format: {}", other)),
    }

    Ok(())
}
