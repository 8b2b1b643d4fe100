//! Utility modules for the health engine
//!
//! - **error**: Error type and retry support
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a unique poll cycle ID
pub fn generate_poll_id() -> String {
    Uuid::new_v4().to_string()
}

/// Format a millisecond duration as a short human readable string
pub fn format_duration(duration_ms: u64) -> String {
    if duration_ms < 1000 {
        format!("{}ms", duration_ms)
    } else if duration_ms < 60_000 {
        format!("{:.1}s", duration_ms as f64 / 1000.0)
    } else {
        format!("{:.1}m", duration_ms as f64 / 60_000.0)
    }
}

/// Format how long ago `timestamp` was, relative to `now`
pub fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);
    if seconds < 60 {
        format!("{}s ago", seconds)
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else {
        format!("{}h ago", seconds / 3600)
    }
}
