//! Session-level health poller
//!
//! A poller tracks one selected signature at a time. Selecting a different
//! landscape (or a different eligible set) cancels the poll in flight for the
//! previous signature before the new one starts.

use super::types::{PollOptions, PollSnapshot};
use crate::core::cache_manager::{CacheSignature, FetchMode, ResultCache};
use crate::core::health::{HealthCheckResult, PollDispatcher, is_eligible};
use crate::core::registry::{Component, Landscape};
use crate::utils::error::{HealthError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

struct ActivePoll {
    signature: CacheSignature,
    cancel: CancellationToken,
}

/// Last full poll, replayed by `refetch`
#[derive(Clone)]
struct PollRequest {
    signature: CacheSignature,
    components: Arc<[Component]>,
    landscape: Landscape,
}

#[derive(Default)]
struct PollerState {
    active: Option<ActivePoll>,
    last_request: Option<PollRequest>,
}

/// Polls eligible components through the shared cache and publishes snapshots
pub struct HealthPoller {
    dispatcher: PollDispatcher,
    cache: Arc<ResultCache>,
    state: Mutex<PollerState>,
    snapshots: watch::Sender<PollSnapshot>,
    shutdown: CancellationToken,
}

impl std::fmt::Debug for HealthPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthPoller")
            .field("dispatcher", &self.dispatcher)
            .field("signature", &self.snapshots.borrow().signature)
            .finish()
    }
}

impl HealthPoller {
    /// Create a new poller over a shared cache
    pub fn new(dispatcher: PollDispatcher, cache: Arc<ResultCache>) -> Self {
        let (snapshots, _) = watch::channel(PollSnapshot::idle());
        Self {
            dispatcher,
            cache,
            state: Mutex::new(PollerState::default()),
            snapshots,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Poll every eligible component of `landscape`.
    ///
    /// Serves the cached result set while it is fresh. A poll superseded by a
    /// later call for another signature resolves to the current snapshot
    /// instead of an error.
    pub async fn poll(
        &self,
        components: &[Component],
        landscape: &Landscape,
        options: &PollOptions,
    ) -> Result<PollSnapshot> {
        if !options.enabled {
            debug!(landscape = %landscape.id, "poll disabled");
            return Ok(PollSnapshot::idle());
        }

        let landscape = options.effective_landscape(landscape);
        let eligible: Arc<[Component]> = components
            .iter()
            .filter(|c| is_eligible(c, &landscape, options.central_landscape_exists))
            .cloned()
            .collect();

        let request = PollRequest {
            signature: CacheSignature::for_set(&landscape, eligible.len()),
            components: eligible,
            landscape,
        };
        self.run(request, FetchMode::Cached).await
    }

    /// Force a new poll of the last requested signature, bypassing freshness.
    ///
    /// Concurrent refetches of the same signature share one poll.
    pub async fn refetch(&self) -> Result<PollSnapshot> {
        let request = self.state.lock().last_request.clone();
        match request {
            Some(request) => self.run(request, FetchMode::Refresh).await,
            None => {
                debug!("refetch requested before any poll");
                Ok(self.snapshot())
            }
        }
    }

    /// Poll a single component, keyed by component and landscape.
    ///
    /// An ineligible component yields the `UNKNOWN` "not supported" placeholder
    /// without touching the transport.
    pub async fn poll_one(
        &self,
        component: &Component,
        landscape: &Landscape,
        options: &PollOptions,
    ) -> Result<HealthCheckResult> {
        let landscape = options.effective_landscape(landscape);
        if !is_eligible(component, &landscape, options.central_landscape_exists) {
            return Ok(HealthCheckResult::unsupported(component, &landscape));
        }

        let signature = CacheSignature::for_component(&landscape, &component.id);
        let cancel = self.shutdown.child_token();
        let batch = std::slice::from_ref(component);
        let (dispatcher, landscape_ref, cancel_ref) = (&self.dispatcher, &landscape, &cancel);

        let entry = match self
            .cache
            .get_or_poll(&signature, FetchMode::Cached, move || {
                dispatcher.dispatch(batch, landscape_ref, cancel_ref)
            })
            .await
        {
            Ok(entry) => entry,
            Err(e) if e.is_cancelled() => {
                return Ok(HealthCheckResult::loading(component, &landscape));
            }
            Err(e) => return Err(e),
        };

        entry.results.first().cloned().ok_or_else(|| {
            HealthError::internal(format!("empty result for component {}", component.id))
        })
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> PollSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receive every snapshot transition (loading, fetching, settled)
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.snapshots.subscribe()
    }

    /// Cancel the poll in flight, if any. Results already shown are kept.
    pub fn cancel(&self) {
        if let Some(active) = self.state.lock().active.take() {
            active.cancel.cancel();
            self.snapshots.send_if_modified(|snapshot| {
                std::mem::replace(&mut snapshot.is_fetching, false)
            });
            debug!(signature = %active.signature, "active poll cancelled");
        }
    }

    /// Cancel everything and stop auto-refresh tasks
    pub fn shutdown(&self) {
        self.cancel();
        self.shutdown.cancel();
    }

    /// Refetch the selected signature every `period` until shutdown
    pub fn spawn_auto_refresh(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let poller = Arc::clone(self);
        let shutdown = self.shutdown.clone();
        info!("auto-refresh every {:?}", period);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await;

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = poller.refetch().await {
                            warn!("auto-refresh failed: {}", e);
                        }
                    }
                }
            }
            debug!("auto-refresh stopped");
        })
    }

    async fn run(&self, request: PollRequest, mode: FetchMode) -> Result<PollSnapshot> {
        let signature = request.signature.clone();
        let cancel = self.activate(&request);

        let previous = self.cache.peek(&signature).await;
        let needs_poll = match (&previous, mode) {
            (None, _) | (_, FetchMode::Refresh) => true,
            (Some(entry), FetchMode::Cached) => entry.is_stale(self.cache.config().stale_time),
        };
        if needs_poll {
            let pending = match &previous {
                Some(entry) => PollSnapshot::from_entry(signature.clone(), entry).fetching(),
                None => PollSnapshot::loading(
                    signature.clone(),
                    &request.components,
                    &request.landscape,
                ),
            };
            self.publish_if_active(&signature, pending);
        }

        let (dispatcher, components, landscape, cancel_ref) = (
            &self.dispatcher,
            &request.components,
            &request.landscape,
            &cancel,
        );
        let outcome = self
            .cache
            .get_or_poll(&signature, mode, move || {
                dispatcher.dispatch(components, landscape, cancel_ref)
            })
            .await;

        match outcome {
            Ok(entry) => {
                let snapshot = PollSnapshot::from_entry(signature.clone(), &entry);
                if self.publish_if_active(&signature, snapshot.clone()) {
                    Ok(snapshot)
                } else {
                    debug!(signature = %signature, "result for deselected signature not published");
                    Ok(self.snapshot())
                }
            }
            Err(e) if e.is_cancelled() => {
                debug!(signature = %signature, "poll superseded");
                Ok(self.snapshot())
            }
            Err(e) => {
                let failed = match previous {
                    Some(entry) => PollSnapshot::from_entry(signature.clone(), &entry),
                    None => PollSnapshot {
                        signature: Some(signature.clone()),
                        ..PollSnapshot::idle()
                    },
                }
                .failed(e.to_string());
                self.publish_if_active(&signature, failed);
                Err(e)
            }
        }
    }

    /// Select `request.signature`, cancelling a poll for any other signature
    fn activate(&self, request: &PollRequest) -> CancellationToken {
        let mut state = self.state.lock();
        state.last_request = Some(request.clone());

        if let Some(active) = &state.active {
            if active.signature == request.signature && !active.cancel.is_cancelled() {
                return active.cancel.clone();
            }
            if active.signature != request.signature {
                info!(
                    from = %active.signature,
                    to = %request.signature,
                    "selection changed, cancelling previous poll"
                );
                active.cancel.cancel();
            }
        }

        let cancel = self.shutdown.child_token();
        state.active = Some(ActivePoll {
            signature: request.signature.clone(),
            cancel: cancel.clone(),
        });
        cancel
    }

    fn publish_if_active(&self, signature: &CacheSignature, snapshot: PollSnapshot) -> bool {
        let state = self.state.lock();
        let is_active = state
            .active
            .as_ref()
            .is_some_and(|active| &active.signature == signature);
        if is_active {
            self.snapshots.send_replace(snapshot);
        }
        is_active
    }
}

impl Drop for HealthPoller {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
