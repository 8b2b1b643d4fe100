//! Logging utilities
//!
//! Installs the `tracing` subscriber used by the binary and the HTTP surface.

pub mod init;
pub mod types;

pub use init::{build_env_filter, init_logging};
pub use types::LogLevel;
