//! Logging configuration

use crate::utils::logging::LogLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.level != LogLevel::default() {
            self.level = other.level;
        }
        self.json |= other.json;
        self
    }
}
