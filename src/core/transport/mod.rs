//! Health Transport
//!
//! A transport performs exactly one network probe for a (component, landscape)
//! pair and reports the raw outcome. Classification into canonical statuses
//! happens in [`crate::core::health::classifier`]; the transport only moves bytes.
//!
//! - `types` - Probe request/response wire types and the nested health payload
//! - `http` - reqwest-backed transport built from an endpoint template

pub mod http;
pub mod types;

pub use http::HttpHealthTransport;
pub use types::{HealthPayload, ProbeOutcome, ProbeRequest, ProbeResponse};

use crate::utils::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// One network probe per call
#[async_trait]
pub trait HealthTransport: Send + Sync {
    /// Probe a single component in a single landscape.
    ///
    /// Implementations must stop waiting and return
    /// [`HealthError::Cancelled`](crate::utils::error::HealthError::Cancelled)
    /// once `cancel` fires.
    async fn probe(
        &self,
        request: &ProbeRequest,
        cancel: &CancellationToken,
    ) -> Result<ProbeResponse>;

    /// Transport name for logs
    fn name(&self) -> &'static str;
}
