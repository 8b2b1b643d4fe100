//! Poll engine configuration

use super::*;
use crate::core::cache_manager::CacheConfig;
use crate::utils::error::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache and poll timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seconds a result set is served without re-polling
    #[serde(default = "default_stale_time_secs")]
    pub stale_time_secs: u64,
    /// Seconds an unused result set is kept before eviction
    #[serde(default = "default_gc_time_secs")]
    pub gc_time_secs: u64,
    #[serde(default = "default_max_cache_entries")]
    pub max_cache_entries: u64,
    /// Retries after a failed poll (not counting the first attempt)
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Periodic refetch interval for `watch` and `serve`
    #[serde(default)]
    pub auto_refresh_secs: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stale_time_secs: default_stale_time_secs(),
            gc_time_secs: default_gc_time_secs(),
            max_cache_entries: default_max_cache_entries(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            auto_refresh_secs: None,
        }
    }
}

impl EngineConfig {
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }

    pub fn gc_time(&self) -> Duration {
        Duration::from_secs(self.gc_time_secs)
    }

    pub fn auto_refresh(&self) -> Option<Duration> {
        self.auto_refresh_secs.map(Duration::from_secs)
    }

    /// Result cache settings derived from this section
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_entries: self.max_cache_entries,
            stale_time: self.stale_time(),
            gc_time: self.gc_time(),
            retry: RetryConfig::with_retries(
                self.retry_attempts,
                Duration::from_millis(self.retry_delay_ms),
            ),
        }
    }

    /// Merge engine configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.stale_time_secs != default_stale_time_secs() {
            self.stale_time_secs = other.stale_time_secs;
        }
        if other.gc_time_secs != default_gc_time_secs() {
            self.gc_time_secs = other.gc_time_secs;
        }
        if other.max_cache_entries != default_max_cache_entries() {
            self.max_cache_entries = other.max_cache_entries;
        }
        if other.retry_attempts != default_retry_attempts() {
            self.retry_attempts = other.retry_attempts;
        }
        if other.retry_delay_ms != default_retry_delay_ms() {
            self.retry_delay_ms = other.retry_delay_ms;
        }
        if other.auto_refresh_secs.is_some() {
            self.auto_refresh_secs = other.auto_refresh_secs;
        }
        self
    }
}
