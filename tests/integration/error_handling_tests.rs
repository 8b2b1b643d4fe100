//! Error handling integration tests
//!
//! Check how errors surface over HTTP and which of them the cache retries.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;
    use landscape_health::HealthError;

    // ==================== HTTP status mapping ====================

    #[test]
    fn test_not_found_maps_to_404() {
        let error = HealthError::not_found("Landscape not found: ap99");
        assert_eq!(error.error_response().status().as_u16(), 404);
    }

    #[test]
    fn test_bad_requests_map_to_400() {
        let errors = [
            HealthError::validation("unknown sort column: owner"),
            HealthError::malformed_batch("duplicate component id c1"),
        ];
        for error in errors {
            assert_eq!(error.error_response().status().as_u16(), 400);
        }
    }

    #[test]
    fn test_upstream_failures_map_to_gateway_codes() {
        assert_eq!(
            HealthError::timeout("Health check timed out after 10s")
                .error_response()
                .status()
                .as_u16(),
            504
        );
        assert_eq!(
            HealthError::transport("Health endpoint unreachable")
                .error_response()
                .status()
                .as_u16(),
            502
        );
    }

    #[test]
    fn test_cancelled_maps_to_409() {
        let error = HealthError::cancelled("poll of eu10 superseded");
        assert_eq!(error.error_response().status().as_u16(), 409);
    }

    #[test]
    fn test_config_error_is_internal() {
        let error = HealthError::config("gc_time_secs must be greater than 0");
        assert_eq!(error.error_response().status().as_u16(), 500);
    }

    #[actix_web::test]
    async fn test_error_body_carries_code_and_message() {
        let error = HealthError::not_found("Landscape not found: ap99");
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let text = json.to_string();
        assert!(text.contains("NOT_FOUND"), "{}", text);
        assert!(text.contains("ap99"), "{}", text);
    }

    // ==================== Retry classification ====================

    #[test]
    fn test_transient_errors_are_retryable() {
        assert!(HealthError::transport("connection reset").is_retryable());
        assert!(HealthError::timeout("timed out").is_retryable());
        assert!(!HealthError::cancelled("superseded").is_retryable());
        assert!(!HealthError::malformed_batch("blank id").is_retryable());
        assert!(!HealthError::config("bad").is_retryable());
    }

    #[test]
    fn test_io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: HealthError = io.into();
        assert!(matches!(error, HealthError::Io(_)));
        assert_eq!(error.error_response().status().as_u16(), 500);
    }
}
