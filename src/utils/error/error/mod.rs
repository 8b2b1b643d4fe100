//! Error handling for the health engine
//!
//! This module defines all error types used throughout the engine.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{HealthError, Result};
