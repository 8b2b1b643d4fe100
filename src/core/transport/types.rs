//! Probe wire types

use crate::core::registry::{Component, Landscape};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub component_id: String,
    pub component_name: String,
    pub landscape_id: String,
    pub landscape_name: String,
    /// Base network address of the landscape
    pub route: String,
}

impl ProbeRequest {
    pub fn new(component: &Component, landscape: &Landscape) -> Self {
        Self {
            component_id: component.id.clone(),
            component_name: component.name.clone(),
            landscape_id: landscape.id.clone(),
            landscape_name: landscape.name.clone(),
            route: landscape.route.clone(),
        }
    }
}

/// Transport-level outcome of a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeOutcome {
    Success,
    Error,
}

/// Raw result of a single probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub outcome: ProbeOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<HealthPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub response_time_ms: u64,
}

impl ProbeResponse {
    pub fn success(data: HealthPayload, response_time_ms: u64) -> Self {
        Self {
            outcome: ProbeOutcome::Success,
            data: Some(data),
            error: None,
            response_time_ms,
        }
    }

    pub fn failure(error: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            outcome: ProbeOutcome::Error,
            data: None,
            error: Some(error.into()),
            response_time_ms,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ProbeOutcome::Success
    }
}

/// Health document returned by a component's health endpoint.
///
/// The shape follows the common actuator layout: a top-level `status`, optional
/// free-form `details`, and a tree of named sub-components with the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<BTreeMap<String, HealthPayload>>,
}

impl HealthPayload {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            details: None,
            components: None,
        }
    }

    pub fn with_component(mut self, name: impl Into<String>, component: HealthPayload) -> Self {
        self.components
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), component);
        self
    }

    /// Flatten the sub-component tree into `(path, status)` rows, depth first.
    ///
    /// Paths are joined with `/`; the root itself is not included.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut rows = Vec::new();
        self.flatten_into("", &mut rows);
        rows
    }

    fn flatten_into(&self, prefix: &str, rows: &mut Vec<(String, String)>) {
        let Some(components) = &self.components else {
            return;
        };
        for (name, child) in components {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", prefix, name)
            };
            let status = child.status.clone().unwrap_or_else(|| "UNKNOWN".to_string());
            rows.push((path.clone(), status));
            child.flatten_into(&path, rows);
        }
    }

    /// Paths of sub-components whose status is not `UP`
    pub fn unhealthy_paths(&self) -> Vec<String> {
        self.flatten()
            .into_iter()
            .filter(|(_, status)| !status.eq_ignore_ascii_case("UP"))
            .map(|(path, _)| path)
            .collect()
    }
}
