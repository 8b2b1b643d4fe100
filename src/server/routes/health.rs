//! Service liveness and version endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/version", web::get().to(version_info));
}

/// Liveness of this service (not of the monitored components)
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let status = ServiceStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        uptime_seconds: (chrono::Utc::now() - state.started_at).num_seconds().max(0) as u64,
        cached_signatures: state.cache.entry_count(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
}

async fn version_info() -> ActixResult<HttpResponse> {
    let version = VersionInfo {
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        build_time: Cow::Borrowed(env!("BUILD_TIME")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(version)))
}

#[derive(Debug, Serialize)]
struct ServiceStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    uptime_seconds: u64,
    cached_signatures: u64,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: Cow<'static, str>,
    build_time: Cow<'static, str>,
    git_hash: Cow<'static, str>,
}
