//! HTTP transport integration tests
//!
//! Run the dispatcher over the real HTTP transport against a mock health
//! endpoint.

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::{ComponentFactory, RegistryFactory};
    use landscape_health::config::TransportConfig;
    use landscape_health::{HealthCheckResult, HealthStatus, HttpHealthTransport, PollDispatcher};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_config(server: &MockServer) -> TransportConfig {
        TransportConfig {
            endpoint_template: format!("{}/{{landscape_id}}/{{component_name}}/health", server.uri()),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    async fn probe_one(config: &TransportConfig) -> HealthCheckResult {
        let transport = Arc::new(HttpHealthTransport::new(config).unwrap());
        let dispatcher = PollDispatcher::new(transport);
        let results = assert_ok!(
            dispatcher
                .dispatch(
                    &[ComponentFactory::service(1)],
                    &RegistryFactory::eu10(),
                    &CancellationToken::new(),
                )
                .await
        );
        assert_eq!(results.len(), 1);
        results.into_iter().next().unwrap()
    }

    async fn mount(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/eu10/service-1/health"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_up_payload() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "status": "UP" })),
        )
        .await;

        let result = probe_one(&transport_config(&server)).await;
        assert_eq!(result.status, HealthStatus::Up);
        assert_eq!(result.landscape, "EU10");
        assert!(result.response_time.is_some());
        assert!(result.last_checked.is_some());
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_nested_down_payload_names_failing_parts() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "status": "DOWN",
                "components": {
                    "db": { "status": "DOWN", "details": { "error": "connection refused" } },
                    "diskSpace": { "status": "UP" }
                }
            })),
        )
        .await;

        let result = probe_one(&transport_config(&server)).await;
        assert_eq!(result.status, HealthStatus::Down);
        assert_eq!(result.error.as_deref(), Some("Unhealthy components: db"));

        let payload = result.response.expect("payload kept for details");
        assert_eq!(
            payload.flatten(),
            vec![
                ("db".to_string(), "DOWN".to_string()),
                ("diskSpace".to_string(), "UP".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(503).set_body_json(json!({ "status": "DOWN" })),
        )
        .await;

        let result = probe_one(&transport_config(&server)).await;
        assert_eq!(result.status, HealthStatus::Error);
        assert_eq!(
            result.error.as_deref(),
            Some("Health endpoint returned HTTP 503")
        );
        assert_eq!(result.response_time, None);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_error() {
        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(200).set_body_string("<html>ok</html>")).await;

        let result = probe_one(&transport_config(&server)).await;
        assert_eq!(result.status, HealthStatus::Error);
        assert!(
            result
                .error
                .as_deref()
                .unwrap()
                .starts_with("Malformed health payload")
        );
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "UP" }))
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let config = TransportConfig {
            timeout_secs: 1,
            ..transport_config(&server)
        };
        let result = probe_one(&config).await;
        assert_eq!(result.status, HealthStatus::Error);
        assert_eq!(
            result.error.as_deref(),
            Some("Health check timed out after 1s")
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        let config = TransportConfig {
            endpoint_template: "http://127.0.0.1:1/{landscape_id}/{component_name}/health"
                .to_string(),
            timeout_secs: 2,
            ..Default::default()
        };

        let result = probe_one(&config).await;
        assert_eq!(result.status, HealthStatus::Error);
        assert!(
            result
                .error
                .as_deref()
                .unwrap()
                .starts_with("Health endpoint unreachable")
        );
    }

    #[tokio::test]
    async fn test_configured_headers_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eu10/service-1/health"))
            .and(header("x-portal-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "UP" })))
            .expect(1)
            .mount(&server)
            .await;

        let config = TransportConfig {
            headers: HashMap::from([("x-portal-key".to_string(), "secret".to_string())]),
            ..transport_config(&server)
        };
        let result = probe_one(&config).await;
        assert_eq!(result.status, HealthStatus::Up);
    }

    /// Every component of a batch gets its own endpoint
    #[tokio::test]
    async fn test_batch_hits_each_endpoint() {
        let server = MockServer::start().await;
        for n in 1..=3 {
            Mock::given(method("GET"))
                .and(path(format!("/eu10/service-{}/health", n)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "UP" })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let transport = Arc::new(HttpHealthTransport::new(&transport_config(&server)).unwrap());
        let results = assert_ok!(
            PollDispatcher::new(transport)
                .dispatch(
                    &ComponentFactory::services(3),
                    &RegistryFactory::eu10(),
                    &CancellationToken::new(),
                )
                .await
        );

        let ids: Vec<_> = results.iter().map(|r| r.component_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
        assert!(results.iter().all(|r| r.status == HealthStatus::Up));
    }
}
