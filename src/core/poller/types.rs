//! Poller request options and observable state

use crate::core::cache_manager::{CacheEntry, CacheSignature};
use crate::core::health::{HealthCheckResult, HealthSummary, summarize};
use crate::core::registry::{Component, Landscape, Registry};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Options of a [`HealthPoller::poll`](super::HealthPoller::poll) call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// A disabled poll returns an empty snapshot and touches nothing
    pub enabled: bool,
    /// Overrides `landscape.is_central` when set
    pub is_central_landscape: Option<bool>,
    /// Whether the registry contains at least one central landscape
    pub central_landscape_exists: bool,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            is_central_landscape: None,
            central_landscape_exists: true,
        }
    }
}

impl PollOptions {
    /// Options derived from the registry the landscape belongs to
    pub fn for_registry(registry: &Registry) -> Self {
        Self {
            central_landscape_exists: registry.has_central_landscape(),
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Whether `landscape` is treated as central, honouring the override
    pub fn is_central(&self, landscape: &Landscape) -> bool {
        self.is_central_landscape.unwrap_or(landscape.is_central)
    }

    /// The landscape as the eligibility filter should see it
    pub fn effective_landscape(&self, landscape: &Landscape) -> Landscape {
        let mut effective = landscape.clone();
        effective.is_central = self.is_central(landscape);
        effective
    }
}

/// What the poller currently shows for its selected signature
#[derive(Debug, Clone, Default)]
pub struct PollSnapshot {
    pub signature: Option<CacheSignature>,
    pub results: Arc<[HealthCheckResult]>,
    /// No data has been produced for the signature yet
    pub is_loading: bool,
    /// A poll for the signature is in flight
    pub is_fetching: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub poll_id: Option<String>,
    /// Message of the last failed poll, cleared by the next success
    pub error: Option<String>,
}

impl PollSnapshot {
    /// Snapshot of a disabled or not yet started poll
    pub fn idle() -> Self {
        Self::default()
    }

    /// One `LOADING` row per eligible component
    pub(crate) fn loading(
        signature: CacheSignature,
        components: &[Component],
        landscape: &Landscape,
    ) -> Self {
        Self {
            signature: Some(signature),
            results: components
                .iter()
                .map(|component| HealthCheckResult::loading(component, landscape))
                .collect(),
            is_loading: true,
            is_fetching: true,
            ..Default::default()
        }
    }

    pub(crate) fn from_entry(signature: CacheSignature, entry: &CacheEntry) -> Self {
        Self {
            signature: Some(signature),
            results: Arc::clone(&entry.results),
            is_loading: false,
            is_fetching: false,
            last_updated: Some(entry.fetched_at),
            poll_id: Some(entry.poll_id.clone()),
            error: None,
        }
    }

    pub(crate) fn fetching(mut self) -> Self {
        self.is_fetching = true;
        self
    }

    pub(crate) fn failed(mut self, message: String) -> Self {
        self.is_fetching = false;
        self.error = Some(message);
        self
    }

    /// Summary of the current results, recomputed on every call
    pub fn summary(&self) -> HealthSummary {
        summarize(&self.results)
    }

    /// Landscape id of the selected signature
    pub fn landscape_id(&self) -> Option<&str> {
        self.signature.as_ref().map(|s| s.landscape_id.as_str())
    }
}
