//! Configuration management
//!
//! Settings come from a YAML file, `LANDSCAPE_HEALTH_*` environment variables,
//! or both (environment wins). The registry section is the engine's input.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::ENV_PREFIX;
pub use models::*;
pub use validation::Validate;

use crate::core::registry::Registry;
use crate::utils::error::{HealthError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub registry: Registry,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HealthError::config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| HealthError::config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides(std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    /// File (when given) plus environment overrides, validated
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        config.apply_env_overrides(std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.engine
            .validate()
            .map_err(|e| HealthError::config(format!("Engine config error: {}", e)))?;
        self.transport
            .validate()
            .map_err(|e| HealthError::config(format!("Transport config error: {}", e)))?;
        self.server
            .validate()
            .map_err(|e| HealthError::config(format!("Server config error: {}", e)))?;
        self.registry
            .validate()
            .map_err(|e| HealthError::config(format!("Registry error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.engine = self.engine.merge(other.engine);
        self.transport = self.transport.merge(other.transport);
        self.server = self.server.merge(other.server);
        self.logging = self.logging.merge(other.logging);
        self.registry = self.registry.merge(other.registry);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| HealthError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
