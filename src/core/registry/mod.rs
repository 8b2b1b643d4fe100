//! Landscape / component registry
//!
//! The registry is the read-only input of the health engine: the set of
//! components, the landscapes they can be deployed to, and the teams that own
//! them. The engine never mutates it during a poll cycle.

pub mod types;

pub use types::{Component, ComponentLinks, Landscape, Registry, Team};
