//! # landscape-health
//!
//! Component health monitoring and aggregation for multi-landscape service
//! fleets. Polls the health endpoint of every eligible component in a
//! landscape, classifies the outcomes into canonical statuses, caches result
//! sets per landscape and summarizes them for dashboards.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use landscape_health::{
//!     Config, HealthPoller, HttpHealthTransport, PollDispatcher, PollOptions, ResultCache,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/landscape-health.yaml").await?;
//!     let transport = Arc::new(HttpHealthTransport::new(&config.transport)?);
//!     let cache = Arc::new(ResultCache::new(config.engine.cache_config())?);
//!     let poller = HealthPoller::new(PollDispatcher::new(transport), cache);
//!
//!     let landscape = &config.registry.landscapes[0];
//!     let options = PollOptions::for_registry(&config.registry);
//!     let snapshot = poller
//!         .poll(&config.registry.components, landscape, &options)
//!         .await?;
//!
//!     println!("{:?}", snapshot.summary());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

pub use config::Config;
pub use core::cache_manager::{CacheConfig, CacheSignature, CacheStats, FetchMode, ResultCache};
pub use core::health::{
    HealthCheckResult, HealthStatus, HealthSummary, PollDispatcher, classify, eligible_components,
    is_eligible, summarize,
};
pub use core::poller::{HealthPoller, PollOptions, PollSnapshot};
pub use core::projection::{SortColumn, SortDirection, SortState, ViewOptions};
pub use core::registry::{Component, Landscape, Registry, Team};
pub use core::transport::{HealthPayload, HealthTransport, HttpHealthTransport, ProbeRequest, ProbeResponse};
pub use server::HttpServer;
pub use utils::error::{HealthError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
