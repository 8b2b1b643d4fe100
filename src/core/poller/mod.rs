//! Health poller
//!
//! Ties eligibility, dispatch and the result cache together behind the
//! `poll` / `refetch` / `poll_one` surface consumed by views.

pub mod service;
pub mod types;

pub use service::HealthPoller;
pub use types::{PollOptions, PollSnapshot};
