//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `engine_validators`: Engine, transport and server validators
//! - `registry_validators`: Registry id and ownership checks
//! - `tests`: Test suite for all validators

mod engine_validators;
mod registry_validators;
mod trait_def;

pub use trait_def::Validate;
