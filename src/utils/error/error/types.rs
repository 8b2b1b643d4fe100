//! Error types for the health engine

use thiserror::Error;

/// Result type alias for the health engine
pub type Result<T> = std::result::Result<T, HealthError>;

/// Main error type for the health engine
#[derive(Error, Debug)]
pub enum HealthError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Probe transport errors (non-2xx, unreachable endpoint, malformed payload)
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// The poll was superseded and its results discarded
    #[error("Poll cancelled: {0}")]
    Cancelled(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// The batch handed to the dispatcher could not be orchestrated
    #[error("Malformed batch: {0}")]
    MalformedBatch(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
