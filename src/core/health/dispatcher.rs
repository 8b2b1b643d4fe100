//! Poll dispatcher
//!
//! Fans out one transport call per eligible component and waits for every
//! probe to settle. A failing probe becomes an `ERROR` result; it never aborts
//! the batch. All probes run on the calling task, so the only concurrency is
//! outstanding I/O.

use super::classifier::classify;
use super::types::{HealthCheckResult, HealthStatus};
use crate::core::registry::{Component, Landscape};
use crate::core::transport::{HealthTransport, ProbeRequest};
use crate::utils::error::{HealthError, Result};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Settle-all fan-out over a [`HealthTransport`]
#[derive(Clone)]
pub struct PollDispatcher {
    transport: Arc<dyn HealthTransport>,
}

impl std::fmt::Debug for PollDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollDispatcher")
            .field("transport", &self.transport.name())
            .finish()
    }
}

impl PollDispatcher {
    /// Create a new dispatcher
    pub fn new(transport: Arc<dyn HealthTransport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn HealthTransport> {
        &self.transport
    }

    /// Probe every component concurrently and return one result per component,
    /// in dispatch order.
    ///
    /// Fails only when the batch itself is malformed or when `cancel` fires
    /// before the batch settles; in the latter case every in-flight result is
    /// discarded.
    pub async fn dispatch(
        &self,
        components: &[Component],
        landscape: &Landscape,
        cancel: &CancellationToken,
    ) -> Result<Vec<HealthCheckResult>> {
        validate_batch(components)?;

        if cancel.is_cancelled() {
            return Err(HealthError::cancelled(format!(
                "poll of {} cancelled before dispatch",
                landscape.id
            )));
        }

        let start = Instant::now();
        debug!(
            landscape = %landscape.id,
            components = components.len(),
            transport = self.transport.name(),
            "dispatching health probes"
        );

        let probes = components.iter().map(|component| async move {
            let request = ProbeRequest::new(component, landscape);
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                outcome = self.transport.probe(&request, cancel) => Some(outcome),
            };
            // dropped only when the batch token fired
            let outcome = outcome.filter(|_| !cancel.is_cancelled())?;

            let result = classify(component, landscape, &outcome);
            if result.status == HealthStatus::Error {
                warn!(
                    component = %component.name,
                    landscape = %landscape.id,
                    error = result.error.as_deref().unwrap_or_default(),
                    "health probe failed"
                );
            } else {
                debug!(
                    component = %component.name,
                    landscape = %landscape.id,
                    status = %result.status,
                    response_time_ms = result.response_time,
                    "health probe settled"
                );
            }
            Some(result)
        });

        let settled = join_all(probes).await;

        if cancel.is_cancelled() {
            info!(
                landscape = %landscape.id,
                "poll cancelled, discarding {} settled probes",
                settled.iter().filter(|r| r.is_some()).count()
            );
            return Err(HealthError::cancelled(format!(
                "poll of {} superseded",
                landscape.id
            )));
        }

        let results: Vec<HealthCheckResult> = settled.into_iter().flatten().collect();

        info!(
            landscape = %landscape.id,
            components = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "poll cycle settled"
        );

        Ok(results)
    }
}

/// A batch must not name the same component twice or carry blank ids
fn validate_batch(components: &[Component]) -> Result<()> {
    let mut seen = HashSet::with_capacity(components.len());
    for component in components {
        if component.id.trim().is_empty() {
            return Err(HealthError::malformed_batch(format!(
                "component {:?} has an empty id",
                component.name
            )));
        }
        if !seen.insert(component.id.as_str()) {
            return Err(HealthError::malformed_batch(format!(
                "component id {} appears more than once",
                component.id
            )));
        }
    }
    Ok(())
}
