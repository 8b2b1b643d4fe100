//! Environment overrides
//!
//! Every setting except the registry can be overridden by a
//! `LANDSCAPE_HEALTH_*` variable.

use super::Config;
use crate::utils::error::{HealthError, Result};
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};

/// Prefix of every recognised environment variable
pub const ENV_PREFIX: &str = "LANDSCAPE_HEALTH_";

impl Config {
    /// Apply `LANDSCAPE_HEALTH_*` overrides from `vars`; other variables are ignored
    pub fn apply_env_overrides<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let key = key.as_ref();
            let value = value.as_ref();

            match name {
                "STALE_TIME_SECS" => self.engine.stale_time_secs = parse(key, value)?,
                "GC_TIME_SECS" => self.engine.gc_time_secs = parse(key, value)?,
                "MAX_CACHE_ENTRIES" => self.engine.max_cache_entries = parse(key, value)?,
                "RETRY_ATTEMPTS" => self.engine.retry_attempts = parse(key, value)?,
                "RETRY_DELAY_MS" => self.engine.retry_delay_ms = parse(key, value)?,
                "AUTO_REFRESH_SECS" => self.engine.auto_refresh_secs = Some(parse(key, value)?),
                "ENDPOINT_TEMPLATE" => self.transport.endpoint_template = value.to_string(),
                "TIMEOUT_SECS" => self.transport.timeout_secs = parse(key, value)?,
                "USER_AGENT" => self.transport.user_agent = value.to_string(),
                "HOST" => self.server.host = value.to_string(),
                "PORT" => self.server.port = parse(key, value)?,
                "WORKERS" => self.server.workers = Some(parse(key, value)?),
                "LOG_LEVEL" => self.logging.level = parse(key, value)?,
                "LOG_JSON" => self.logging.json = parse(key, value)?,
                _ => {
                    warn!("Ignoring unknown setting {}", key);
                    continue;
                }
            }
            debug!("Applied override {}", key);
        }
        Ok(())
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| HealthError::config(format!("Invalid value for {}: {}", key, e)))
}
