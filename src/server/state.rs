//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::cache_manager::ResultCache;
use crate::core::health::PollDispatcher;
use crate::core::poller::{HealthPoller, PollOptions};
use crate::core::registry::{Landscape, Registry};
use crate::core::transport::HealthTransport;
use crate::utils::error::{HealthError, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// HTTP server state shared across handlers
///
/// Every landscape gets its own poller so concurrent dashboard views of
/// different landscapes never cancel each other. All pollers share one
/// dispatcher and one result cache.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<ResultCache>,
    dispatcher: PollDispatcher,
    pollers: Arc<Mutex<HashMap<String, Arc<HealthPoller>>>>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState over `transport`
    pub fn new(config: Config, transport: Arc<dyn HealthTransport>) -> Result<Self> {
        let cache = ResultCache::new(config.engine.cache_config())?;
        Ok(Self {
            config: Arc::new(config),
            cache: Arc::new(cache),
            dispatcher: PollDispatcher::new(transport),
            pollers: Arc::new(Mutex::new(HashMap::new())),
            started_at: Utc::now(),
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.config.registry
    }

    /// Poll options matching the configured registry
    pub fn poll_options(&self) -> PollOptions {
        PollOptions::for_registry(self.registry())
    }

    /// Look up a landscape or fail with `NotFound`
    pub fn landscape(&self, id: &str) -> Result<&Landscape> {
        self.registry()
            .landscape(id)
            .ok_or_else(|| HealthError::not_found(format!("Landscape {} not found", id)))
    }

    /// Poller for a landscape, created on first use
    pub fn poller(&self, landscape_id: &str) -> Arc<HealthPoller> {
        let mut pollers = self.pollers.lock();
        if let Some(poller) = pollers.get(landscape_id) {
            return Arc::clone(poller);
        }

        debug!("Creating poller for landscape {}", landscape_id);
        let poller = Arc::new(HealthPoller::new(
            self.dispatcher.clone(),
            Arc::clone(&self.cache),
        ));
        if let Some(period) = self.config.engine.auto_refresh() {
            poller.spawn_auto_refresh(period);
        }
        pollers.insert(landscape_id.to_string(), Arc::clone(&poller));
        poller
    }

    /// Stop every poller
    pub fn shutdown(&self) {
        for poller in self.pollers.lock().values() {
            poller.shutdown();
        }
    }
}
