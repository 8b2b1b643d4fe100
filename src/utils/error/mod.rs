//! Error handling utilities
//!
//! This module provides the engine error type and retry support.

pub mod error;
pub mod recovery;

pub use error::*;
pub use recovery::*;
