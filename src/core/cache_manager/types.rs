//! Result cache type definitions
//!
//! Configuration, keys (poll signatures), entries and statistics.

use crate::core::health::HealthCheckResult;
use crate::core::registry::Landscape;
use crate::utils::error::RetryConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of signatures kept
    pub max_entries: u64,
    /// Entries younger than this are served without polling
    pub stale_time: Duration,
    /// Entries not accessed for this long are evicted
    pub gc_time: Duration,
    /// Retry policy applied to a failing producer
    pub retry: RetryConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            stale_time: Duration::from_secs(60),
            gc_time: Duration::from_secs(300),
            retry: RetryConfig::with_retries(1, Duration::from_millis(250)),
        }
    }
}

/// What a signature covers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignatureScope {
    /// Full eligible set of a landscape, identified by its size
    ComponentSet { eligible_count: usize },
    /// Single component, used by detail views
    Component { component_id: String },
}

/// Cache key: landscape identity plus the scope of the poll
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheSignature {
    pub landscape_id: String,
    pub landscape_name: String,
    pub landscape_route: String,
    pub scope: SignatureScope,
}

impl CacheSignature {
    /// Signature of a full poll over `eligible_count` components
    pub fn for_set(landscape: &Landscape, eligible_count: usize) -> Self {
        Self {
            landscape_id: landscape.id.clone(),
            landscape_name: landscape.name.clone(),
            landscape_route: landscape.route.clone(),
            scope: SignatureScope::ComponentSet { eligible_count },
        }
    }

    /// Signature of a single-component poll
    pub fn for_component(landscape: &Landscape, component_id: &str) -> Self {
        Self {
            landscape_id: landscape.id.clone(),
            landscape_name: landscape.name.clone(),
            landscape_route: landscape.route.clone(),
            scope: SignatureScope::Component {
                component_id: component_id.to_string(),
            },
        }
    }
}

impl std::fmt::Display for CacheSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.scope {
            SignatureScope::ComponentSet { eligible_count } => write!(
                f,
                "{}|{}|{}|{}",
                self.landscape_id, self.landscape_name, self.landscape_route, eligible_count
            ),
            SignatureScope::Component { component_id } => write!(
                f,
                "{}|{}|{}|component:{}",
                self.landscape_id, self.landscape_name, self.landscape_route, component_id
            ),
        }
    }
}

/// Result array produced by one poll cycle. Never mutated after creation.
#[derive(Debug)]
pub struct CacheEntry {
    pub results: Arc<[HealthCheckResult]>,
    /// Monotonic creation time, used for staleness
    pub created_at: Instant,
    /// Wall-clock creation time, for display
    pub fetched_at: DateTime<Utc>,
    pub poll_id: String,
}

impl CacheEntry {
    pub fn new(results: Vec<HealthCheckResult>, poll_id: String) -> Self {
        Self {
            results: results.into(),
            created_at: Instant::now(),
            fetched_at: Utc::now(),
            poll_id,
        }
    }

    /// Get the age of the entry
    pub fn age(&self) -> Duration {
        Instant::now().duration_since(self.created_at)
    }

    /// Whether the entry must be re-polled before being served
    pub fn is_stale(&self, stale_time: Duration) -> bool {
        self.age() >= stale_time
    }
}

/// How [`ResultCache::get_or_poll`](super::ResultCache::get_or_poll) treats an existing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Serve a fresh entry, poll when missing or stale
    Cached,
    /// Poll unless an entry was produced after this request was made
    Refresh,
}

/// Atomic cache statistics for lock-free hot path updates
#[derive(Debug, Default)]
pub struct AtomicCacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub stale: AtomicU64,
    /// Producer invocations that completed successfully
    pub polls: AtomicU64,
    /// Waiters that reused an entry produced while they were queued
    pub coalesced: AtomicU64,
    pub failures: AtomicU64,
    pub cancellations: AtomicU64,
}

impl AtomicCacheStats {
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            polls: self.polls.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            cancellations: self.cancellations.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics snapshot (returned to callers)
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stale: u64,
    pub polls: u64,
    pub coalesced: u64,
    pub failures: u64,
    pub cancellations: u64,
}

impl CacheStats {
    /// Share of lookups served without polling
    pub fn hit_rate(&self) -> f64 {
        let served = self.hits + self.coalesced;
        let total = served + self.misses + self.stale;
        if total == 0 {
            0.0
        } else {
            served as f64 / total as f64
        }
    }
}
