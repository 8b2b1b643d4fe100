//! Configuration data models

#![allow(missing_docs)]

pub mod engine;
pub mod logging;
pub mod server;
pub mod transport;

pub use engine::*;
pub use logging::*;
pub use server::*;
pub use transport::*;

pub fn default_stale_time_secs() -> u64 {
    60
}

pub fn default_gc_time_secs() -> u64 {
    300
}

pub fn default_max_cache_entries() -> u64 {
    1000
}

/// One retry after the first attempt
pub fn default_retry_attempts() -> u32 {
    1
}

pub fn default_retry_delay_ms() -> u64 {
    250
}

pub fn default_endpoint_template() -> String {
    "https://{component_name}.{route}/health".to_string()
}

/// Probe timeout in seconds
pub fn default_timeout_secs() -> u64 {
    10
}

pub fn default_user_agent() -> String {
    format!("landscape-health/{}", env!("CARGO_PKG_VERSION"))
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8080
}
