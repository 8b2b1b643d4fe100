//! HTTP server
//!
//! JSON surface over the health engine for dashboards.

pub mod routes;
pub mod server;
pub mod state;

pub use server::HttpServer;
pub use state::AppState;
