//! Component health monitoring
//!
//! This module turns a registry slice into classified health results.
//!
//! # Module Structure
//!
//! - `types` - Canonical status, per-component results and summary
//! - `eligibility` - Which components are probed in which landscape
//! - `classifier` - Raw transport outcome to canonical status
//! - `dispatcher` - Settle-all concurrent fan-out over the transport
//! - `aggregator` - Summary counters and average latency

pub mod aggregator;
pub mod classifier;
pub mod dispatcher;
pub mod eligibility;
pub mod types;

pub use aggregator::summarize;
pub use classifier::{classify, classify_payload};
pub use dispatcher::PollDispatcher;
pub use eligibility::{eligible_components, is_eligible, partition_components};
pub use types::{HealthCheckResult, HealthStatus, HealthSummary, UNSUPPORTED_MESSAGE};
