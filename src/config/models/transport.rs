//! Health transport configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How probe endpoints are built and called
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// URL with `{component_id}`, `{component_name}`, `{landscape_id}`,
    /// `{landscape_name}` and `{route}` placeholders
    #[serde(default = "default_endpoint_template")]
    pub endpoint_template: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Extra headers sent with every probe
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint_template: default_endpoint_template(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            headers: HashMap::new(),
        }
    }
}

impl TransportConfig {
    /// Merge transport configurations; headers are combined, other wins
    pub fn merge(mut self, other: Self) -> Self {
        if other.endpoint_template != default_endpoint_template() {
            self.endpoint_template = other.endpoint_template;
        }
        if other.timeout_secs != default_timeout_secs() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.user_agent != default_user_agent() {
            self.user_agent = other.user_agent;
        }
        self.headers.extend(other.headers);
        self
    }
}
