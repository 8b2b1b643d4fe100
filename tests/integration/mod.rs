//! Integration tests for landscape-health
//!
//! These tests drive several components together: poller, dispatcher and
//! cache over a scripted transport, the HTTP transport over a mock server,
//! and configuration loaded from disk.

pub mod config_tests;
pub mod error_handling_tests;
pub mod http_transport_tests;
pub mod poll_scenario_tests;
