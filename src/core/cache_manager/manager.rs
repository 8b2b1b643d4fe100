//! Result cache implementation
//!
//! One entry per poll signature. Concurrent requests for the same signature
//! are serialized on the entry, so at most one producer runs per signature
//! and late arrivals reuse what it produced.

use super::types::{
    AtomicCacheStats, CacheConfig, CacheEntry, CacheSignature, CacheStats, FetchMode,
};
use crate::core::health::HealthCheckResult;
use crate::utils::error::{HealthError, Result, RetryPolicy};
use crate::utils::generate_poll_id;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};

/// Signature-keyed cache of poll results
pub struct ResultCache {
    entries: Cache<CacheSignature, Arc<CacheEntry>>,
    config: CacheConfig,
    retry: RetryPolicy,
    stats: Arc<AtomicCacheStats>,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("config", &self.config)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl ResultCache {
    /// Create a new result cache
    pub fn new(config: CacheConfig) -> Result<Self> {
        if config.max_entries == 0 {
            return Err(HealthError::config(
                "Invalid cache configuration: max_entries must be greater than 0",
            ));
        }
        if config.stale_time > config.gc_time {
            return Err(HealthError::config(
                "Invalid cache configuration: gc_time must not be shorter than stale_time",
            ));
        }

        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_idle(config.gc_time)
            .build();

        Ok(Self {
            entries,
            retry: RetryPolicy::new(config.retry.clone()),
            config,
            stats: Arc::new(AtomicCacheStats::default()),
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the entry for `signature`, running `producer` when needed.
    ///
    /// With [`FetchMode::Cached`] a fresh entry is returned as-is (the same
    /// `Arc`). With [`FetchMode::Refresh`] the producer runs unless another
    /// caller stored an entry after this call started. A failing producer is
    /// retried per the configured policy; nothing is stored on failure and
    /// the previous entry stays in place.
    pub async fn get_or_poll<F, Fut>(
        &self,
        signature: &CacheSignature,
        mode: FetchMode,
        producer: F,
    ) -> Result<Arc<CacheEntry>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Vec<HealthCheckResult>>>,
    {
        let requested_at = Instant::now();
        let stale_time = self.config.stale_time;

        if mode == FetchMode::Cached {
            match self.entries.get(signature).await {
                Some(entry) if !entry.is_stale(stale_time) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    debug!("Cache hit for {}", signature);
                    return Ok(entry);
                }
                Some(_) => {
                    self.stats.stale.fetch_add(1, Ordering::Relaxed);
                }
                None => {
                    self.stats.misses.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        let stats = Arc::clone(&self.stats);
        let retry = &self.retry;
        let outcome = self
            .entries
            .entry_by_ref(signature)
            .and_try_compute_with(|existing| async move {
                if let Some(existing) = existing {
                    let current = existing.value();
                    let reusable = match mode {
                        FetchMode::Cached => !current.is_stale(stale_time),
                        FetchMode::Refresh => current.created_at > requested_at,
                    };
                    if reusable {
                        stats.coalesced.fetch_add(1, Ordering::Relaxed);
                        return Ok::<_, HealthError>(Op::Nop);
                    }
                }

                let poll_id = generate_poll_id();
                let span = info_span!("poll", poll_id = %poll_id, signature = %signature);
                span.in_scope(|| debug!("polling"));
                let results = retry.call(producer).instrument(span).await?;
                stats.polls.fetch_add(1, Ordering::Relaxed);
                Ok(Op::Put(Arc::new(CacheEntry::new(results, poll_id))))
            })
            .await;

        match outcome {
            Ok(CompResult::Inserted(entry))
            | Ok(CompResult::ReplacedWith(entry))
            | Ok(CompResult::Unchanged(entry)) => Ok(entry.into_value()),
            Ok(CompResult::Removed(_)) | Ok(CompResult::StillNone(_)) => Err(
                HealthError::internal(format!("No cache entry produced for {}", signature)),
            ),
            Err(error) if error.is_cancelled() => {
                self.stats.cancellations.fetch_add(1, Ordering::Relaxed);
                debug!("Poll for {} cancelled", signature);
                Err(error)
            }
            Err(error) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                warn!("Poll for {} failed: {}", signature, error);
                Err(error)
            }
        }
    }

    /// Current entry for `signature`, fresh or stale, without polling
    pub async fn peek(&self, signature: &CacheSignature) -> Option<Arc<CacheEntry>> {
        self.entries.get(signature).await
    }

    /// Drop the entry for a signature
    pub async fn invalidate(&self, signature: &CacheSignature) {
        self.entries.invalidate(signature).await;
    }

    /// Drop every entry belonging to a landscape
    pub async fn invalidate_landscape(&self, landscape_id: &str) {
        let keys: Vec<Arc<CacheSignature>> = self
            .entries
            .iter()
            .filter(|(key, _)| key.landscape_id == landscape_id)
            .map(|(key, _)| key)
            .collect();

        for key in &keys {
            self.entries.invalidate(key.as_ref()).await;
        }
        info!(
            "Invalidated {} cache entries for landscape {}",
            keys.len(),
            landscape_id
        );
    }

    /// Drop everything
    pub fn clear(&self) {
        self.entries.invalidate_all();
        info!("Result cache cleared");
    }

    /// Apply pending evictions (idle expiry, capacity)
    pub async fn sweep(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Approximate number of stored signatures
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
