//! Scripted health transport
//!
//! Answers each component according to a per-component [`Behavior`], using
//! `tokio::time` so tests can run on a paused clock. Every wait honours the
//! cancellation token.

use async_trait::async_trait;
use landscape_health::core::transport::{HealthPayload, HealthTransport, ProbeRequest, ProbeResponse};
use landscape_health::{HealthError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Scripted answer for one component
#[derive(Debug, Clone)]
pub enum Behavior {
    /// `UP` after the given milliseconds
    Up(u64),
    /// `DOWN` with one failing sub-component after the given milliseconds
    Down(u64),
    /// Fails with a timeout error after the transport's timeout
    Timeout,
    /// Fails immediately with a transport error
    Unreachable,
}

/// Transport with scripted per-component behavior
pub struct ScriptedTransport {
    behaviors: HashMap<String, Behavior>,
    default: Behavior,
    timeout: Duration,
    calls: Mutex<Vec<(String, String)>>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedTransport {
    /// Every component is `UP` after 10ms unless scripted otherwise
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
            default: Behavior::Up(10),
            timeout: Duration::from_secs(10),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, component_id: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(component_id.to_string(), behavior);
        self
    }

    pub fn with_default(mut self, behavior: Behavior) -> Self {
        self.default = behavior;
        self
    }

    /// Number of probes started
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of probes started against one landscape
    pub fn calls_for(&self, landscape_id: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|(landscape, _)| landscape == landscape_id)
            .count()
    }

    /// Component ids probed, in start order
    pub fn probed_components(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(_, id)| id.clone()).collect()
    }

    async fn wait(duration: Duration, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            _ = cancel.cancelled() => Err(HealthError::cancelled("scripted probe")),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }
}

#[async_trait]
impl HealthTransport for ScriptedTransport {
    async fn probe(
        &self,
        request: &ProbeRequest,
        cancel: &CancellationToken,
    ) -> Result<ProbeResponse> {
        self.calls
            .lock()
            .push((request.landscape_id.clone(), request.component_id.clone()));

        let behavior = self
            .behaviors
            .get(&request.component_id)
            .unwrap_or(&self.default)
            .clone();

        match behavior {
            Behavior::Up(ms) => {
                Self::wait(Duration::from_millis(ms), cancel).await?;
                Ok(ProbeResponse::success(HealthPayload::with_status("UP"), ms))
            }
            Behavior::Down(ms) => {
                Self::wait(Duration::from_millis(ms), cancel).await?;
                let payload = HealthPayload::with_status("DOWN")
                    .with_component("db", HealthPayload::with_status("DOWN"))
                    .with_component("disk", HealthPayload::with_status("UP"));
                Ok(ProbeResponse::success(payload, ms))
            }
            Behavior::Timeout => {
                Self::wait(self.timeout, cancel).await?;
                Err(HealthError::timeout(format!(
                    "Health check timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
            Behavior::Unreachable => Err(HealthError::transport(format!(
                "Health endpoint unreachable: {}",
                request.route
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
