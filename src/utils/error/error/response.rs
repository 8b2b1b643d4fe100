//! HTTP response handling for errors

use super::types::HealthError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for HealthError {
    fn status_code(&self) -> StatusCode {
        match self {
            HealthError::NotFound(_) => StatusCode::NOT_FOUND,
            HealthError::Validation(_) | HealthError::MalformedBatch(_) => StatusCode::BAD_REQUEST,
            HealthError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            HealthError::Transport(_) | HealthError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            HealthError::Cancelled(_) => StatusCode::CONFLICT,
            HealthError::Config(_)
            | HealthError::Serialization(_)
            | HealthError::Yaml(_)
            | HealthError::Io(_)
            | HealthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_code = match self {
            HealthError::Config(_) => "CONFIG_ERROR",
            HealthError::Validation(_) => "VALIDATION_ERROR",
            HealthError::Transport(_) | HealthError::HttpClient(_) => "TRANSPORT_ERROR",
            HealthError::Serialization(_) | HealthError::Yaml(_) => "SERIALIZATION_ERROR",
            HealthError::Io(_) => "IO_ERROR",
            HealthError::Timeout(_) => "TIMEOUT",
            HealthError::Cancelled(_) => "POLL_CANCELLED",
            HealthError::NotFound(_) => "NOT_FOUND",
            HealthError::MalformedBatch(_) => "MALFORMED_BATCH",
            HealthError::Internal(_) => "INTERNAL_ERROR",
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.to_string(),
                timestamp: chrono::Utc::now().timestamp(),
            },
        })
    }
}

/// Error response body
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail carried by [`ErrorResponse`]
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
