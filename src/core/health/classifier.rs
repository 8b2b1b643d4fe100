//! Status classifier
//!
//! Normalizes raw transport outcomes into canonical [`HealthStatus`] values.
//!
//! | raw outcome                                   | status           |
//! |-----------------------------------------------|------------------|
//! | success, payload healthy                      | `UP`             |
//! | success, payload `UNKNOWN` / `OUT_OF_SERVICE` | preserved        |
//! | success, payload present but not healthy      | `DOWN`           |
//! | transport failure                             | `ERROR`          |
//! | not eligible in the landscape                 | `UNKNOWN`        |
//! | not resolved yet                              | `LOADING`        |

use super::types::{HealthCheckResult, HealthStatus};
use crate::core::registry::{Component, Landscape};
use crate::core::transport::{HealthPayload, ProbeResponse};
use crate::utils::error::{HealthError, Result};

/// Canonical status for a payload returned by a successful probe
pub fn classify_payload(payload: &HealthPayload) -> HealthStatus {
    match payload.status.as_deref().and_then(HealthStatus::from_wire) {
        Some(HealthStatus::Up) => HealthStatus::Up,
        Some(HealthStatus::Unknown) => HealthStatus::Unknown,
        Some(HealthStatus::OutOfService) => HealthStatus::OutOfService,
        _ => HealthStatus::Down,
    }
}

/// Classify one probe outcome into a result.
///
/// `Err` from the transport is a thrown failure; it becomes `ERROR` with the
/// error's message, including a cancellation raised by the transport for
/// this probe alone. Batch cancellation is handled by the dispatcher.
pub fn classify(
    component: &Component,
    landscape: &Landscape,
    outcome: &Result<ProbeResponse>,
) -> HealthCheckResult {
    let response = match outcome {
        Ok(response) => response,
        Err(error) => return HealthCheckResult::error(component, landscape, failure_message(error)),
    };

    if !response.is_success() {
        let message = response
            .error
            .clone()
            .unwrap_or_else(|| "Health check failed".to_string());
        return HealthCheckResult::error(component, landscape, message);
    }

    let Some(payload) = &response.data else {
        return HealthCheckResult::error(component, landscape, "Empty health payload");
    };

    let status = classify_payload(payload);
    let result = HealthCheckResult::completed(
        component,
        landscape,
        status,
        response.response_time_ms,
        Some(payload.clone()),
    );

    if status == HealthStatus::Down {
        let unhealthy = payload.unhealthy_paths();
        if !unhealthy.is_empty() {
            return result.with_error(format!("Unhealthy components: {}", unhealthy.join(", ")));
        }
    }

    result
}

fn failure_message(error: &HealthError) -> String {
    match error {
        HealthError::Transport(message) | HealthError::Timeout(message) => message.clone(),
        other => other.to_string(),
    }
}
