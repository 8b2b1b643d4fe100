//! Health engine core
//!
//! Data flows registry → eligibility → dispatcher (→ transport) → classifier
//! → cache → aggregator, with the poller driving one cycle and the projection
//! shaping results for views.

pub mod cache_manager;
pub mod health;
pub mod poller;
pub mod projection;
pub mod registry;
pub mod transport;
