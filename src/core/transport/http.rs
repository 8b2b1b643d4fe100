//! HTTP health transport

use super::HealthTransport;
use super::types::{HealthPayload, ProbeRequest, ProbeResponse};
use crate::config::TransportConfig;
use crate::utils::error::{HealthError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Probes `GET <endpoint>` where the endpoint is rendered from a template
#[derive(Debug, Clone)]
pub struct HttpHealthTransport {
    client: reqwest::Client,
    endpoint_template: String,
    timeout: Duration,
}

impl HttpHealthTransport {
    /// Create a new HTTP transport
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| HealthError::config(format!("Invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| HealthError::config(format!("Invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| HealthError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint_template: config.endpoint_template.clone(),
            timeout,
        })
    }

    /// Render the probe URL for a request
    pub fn endpoint(&self, request: &ProbeRequest) -> String {
        render_endpoint(&self.endpoint_template, request)
    }

    async fn fetch(&self, url: &str) -> ProbeResponse {
        let start = Instant::now();
        let elapsed = |start: Instant| start.elapsed().as_millis() as u64;

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return ProbeResponse::failure(
                    format!("Health check timed out after {}s", self.timeout.as_secs()),
                    elapsed(start),
                );
            }
            Err(e) => {
                return ProbeResponse::failure(
                    format!("Health endpoint unreachable: {}", e),
                    elapsed(start),
                );
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ProbeResponse::failure(
                format!("Health endpoint returned HTTP {}", status.as_u16()),
                elapsed(start),
            );
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                return ProbeResponse::failure(
                    format!("Failed to read health response: {}", e),
                    elapsed(start),
                );
            }
        };
        let response_time_ms = elapsed(start);

        match serde_json::from_slice::<HealthPayload>(&body) {
            Ok(payload) => ProbeResponse::success(payload, response_time_ms),
            Err(e) => ProbeResponse::failure(
                format!("Malformed health payload: {}", e),
                response_time_ms,
            ),
        }
    }
}

#[async_trait]
impl HealthTransport for HttpHealthTransport {
    async fn probe(
        &self,
        request: &ProbeRequest,
        cancel: &CancellationToken,
    ) -> Result<ProbeResponse> {
        let url = self.endpoint(request);
        debug!(component = %request.component_name, landscape = %request.landscape_id, %url, "probing");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(HealthError::cancelled(format!(
                "probe of {} in {} cancelled",
                request.component_name, request.landscape_id
            ))),
            response = self.fetch(&url) => Ok(response),
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Substitute request fields into an endpoint template.
///
/// Supported placeholders: `{component_id}`, `{component_name}`,
/// `{landscape_id}`, `{landscape_name}`, `{route}`.
pub fn render_endpoint(template: &str, request: &ProbeRequest) -> String {
    template
        .replace("{component_id}", &request.component_id)
        .replace("{component_name}", &request.component_name)
        .replace("{landscape_id}", &request.landscape_id)
        .replace("{landscape_name}", &request.landscape_name)
        .replace("{route}", &request.route)
}
