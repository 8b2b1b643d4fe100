//! Engine, transport and server validators

use super::trait_def::Validate;
use crate::config::models::*;
use reqwest::header::{HeaderName, HeaderValue};
use tracing::debug;

/// Placeholders that tie an endpoint to a landscape
const LANDSCAPE_PLACEHOLDERS: [&str; 2] = ["{route}", "{landscape_id}"];

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating engine configuration");

        if self.stale_time_secs == 0 {
            return Err("stale_time_secs must be greater than 0".to_string());
        }
        if self.gc_time_secs == 0 {
            return Err("gc_time_secs must be greater than 0".to_string());
        }
        if self.gc_time_secs < self.stale_time_secs {
            return Err(format!(
                "gc_time_secs ({}) must not be shorter than stale_time_secs ({})",
                self.gc_time_secs, self.stale_time_secs
            ));
        }
        if self.max_cache_entries == 0 {
            return Err("max_cache_entries must be greater than 0".to_string());
        }
        if self.auto_refresh_secs == Some(0) {
            return Err("auto_refresh_secs must be greater than 0 when set".to_string());
        }
        Ok(())
    }
}

impl Validate for TransportConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating transport configuration");

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if !LANDSCAPE_PLACEHOLDERS
            .iter()
            .any(|p| self.endpoint_template.contains(p))
        {
            return Err(format!(
                "endpoint_template must contain {} or {}",
                LANDSCAPE_PLACEHOLDERS[0], LANDSCAPE_PLACEHOLDERS[1]
            ));
        }
        if !self.endpoint_template.starts_with("http://")
            && !self.endpoint_template.starts_with("https://")
        {
            return Err("endpoint_template must be an http or https URL".to_string());
        }
        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| format!("Invalid header name: {}", name))?;
            HeaderValue::from_str(value)
                .map_err(|_| format!("Invalid value for header {}", name))?;
        }
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating server configuration");

        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.workers == Some(0) {
            return Err("Server workers must be greater than 0 when set".to_string());
        }
        Ok(())
    }
}
