//! Canonical health status, per-component results and summary

use crate::core::registry::{Component, Landscape};
use crate::core::transport::HealthPayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error text carried by placeholder results for ineligible components
pub const UNSUPPORTED_MESSAGE: &str = "not supported in this landscape";

/// Sort priority for statuses outside the ranked set
pub const UNRANKED_PRIORITY: u8 = 5;

/// Canonical health state used for caching, sorting and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    /// Probe not resolved yet
    Loading,
    Up,
    Down,
    /// Transport failure
    Error,
    Unknown,
    OutOfService,
}

struct StatusInfo {
    status: HealthStatus,
    wire: &'static str,
    label: &'static str,
    sort_priority: u8,
}

const STATUS_TABLE: [StatusInfo; 6] = [
    StatusInfo {
        status: HealthStatus::Up,
        wire: "UP",
        label: "Up",
        sort_priority: 1,
    },
    StatusInfo {
        status: HealthStatus::Unknown,
        wire: "UNKNOWN",
        label: "Unknown",
        sort_priority: 2,
    },
    StatusInfo {
        status: HealthStatus::Down,
        wire: "DOWN",
        label: "Down",
        sort_priority: 3,
    },
    StatusInfo {
        status: HealthStatus::Error,
        wire: "ERROR",
        label: "Error",
        sort_priority: 4,
    },
    StatusInfo {
        status: HealthStatus::OutOfService,
        wire: "OUT_OF_SERVICE",
        label: "Out of service",
        sort_priority: UNRANKED_PRIORITY,
    },
    StatusInfo {
        status: HealthStatus::Loading,
        wire: "LOADING",
        label: "Loading",
        sort_priority: UNRANKED_PRIORITY,
    },
];

impl HealthStatus {
    pub const ALL: [HealthStatus; 6] = [
        HealthStatus::Loading,
        HealthStatus::Up,
        HealthStatus::Down,
        HealthStatus::Error,
        HealthStatus::Unknown,
        HealthStatus::OutOfService,
    ];

    fn info(&self) -> &'static StatusInfo {
        // Every variant has a row in STATUS_TABLE.
        let index = match self {
            HealthStatus::Up => 0,
            HealthStatus::Unknown => 1,
            HealthStatus::Down => 2,
            HealthStatus::Error => 3,
            HealthStatus::OutOfService => 4,
            HealthStatus::Loading => 5,
        };
        &STATUS_TABLE[index]
    }

    /// Wire representation (`UP`, `OUT_OF_SERVICE`, ...)
    pub fn as_str(&self) -> &'static str {
        self.info().wire
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        self.info().label
    }

    /// Tie-break key for status-column sorting: `UP=1, UNKNOWN=2, DOWN=3, ERROR=4`, others 5
    pub fn sort_priority(&self) -> u8 {
        self.info().sort_priority
    }

    /// Parse a wire status, case-insensitively
    pub fn from_wire(value: &str) -> Option<Self> {
        let value = value.trim();
        STATUS_TABLE
            .iter()
            .find(|info| info.wire.eq_ignore_ascii_case(value))
            .map(|info| info.status)
    }

    /// Whether the status is final for a poll cycle
    pub fn is_resolved(&self) -> bool {
        *self != HealthStatus::Loading
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one component's probe within one poll cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub component_id: String,
    pub component_name: String,
    /// Landscape name
    pub landscape: String,
    pub status: HealthStatus,
    /// Milliseconds, present only on a completed probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Raw payload, only used by detail views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<HealthPayload>,
}

impl HealthCheckResult {
    fn bare(component: &Component, landscape: &Landscape, status: HealthStatus) -> Self {
        Self {
            component_id: component.id.clone(),
            component_name: component.name.clone(),
            landscape: landscape.name.clone(),
            status,
            response_time: None,
            last_checked: None,
            error: None,
            response: None,
        }
    }

    /// Placeholder for a probe that has not resolved yet
    pub fn loading(component: &Component, landscape: &Landscape) -> Self {
        Self::bare(component, landscape, HealthStatus::Loading)
    }

    /// Synthetic placeholder for a component that is not eligible in `landscape`
    pub fn unsupported(component: &Component, landscape: &Landscape) -> Self {
        let mut result = Self::bare(component, landscape, HealthStatus::Unknown);
        result.error = Some(UNSUPPORTED_MESSAGE.to_string());
        result
    }

    /// Transport failure
    pub fn error(component: &Component, landscape: &Landscape, message: impl Into<String>) -> Self {
        let mut result = Self::bare(component, landscape, HealthStatus::Error);
        result.error = Some(message.into());
        result.last_checked = Some(Utc::now());
        result
    }

    /// Completed probe with a classified payload
    pub fn completed(
        component: &Component,
        landscape: &Landscape,
        status: HealthStatus,
        response_time_ms: u64,
        response: Option<HealthPayload>,
    ) -> Self {
        let mut result = Self::bare(component, landscape, status);
        result.response_time = Some(response_time_ms);
        result.last_checked = Some(Utc::now());
        result.response = response;
        result
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Whether this is the synthetic ineligible placeholder
    pub fn is_unsupported(&self) -> bool {
        self.status == HealthStatus::Unknown && self.error.as_deref() == Some(UNSUPPORTED_MESSAGE)
    }
}

/// Point-in-time reduction of a result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub total: usize,
    pub up: usize,
    pub down: usize,
    pub unknown: usize,
    pub error: usize,
    /// Mean over timed results, rounded to the nearest millisecond
    pub avg_response_time: u64,
}
