//! Subscriber initialisation

use super::types::LogLevel;
use crate::config::LoggingConfig;
use crate::utils::error::{HealthError, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter for the subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to this
/// crate and `warn` applies to dependencies.
pub fn build_env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,landscape_health={}", level.as_str()))
    })
}

/// Install the global `tracing` subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(config.level);

    let result = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .try_init()
    };

    result.map_err(|e| HealthError::config(format!("Failed to initialise logging: {}", e)))
}
