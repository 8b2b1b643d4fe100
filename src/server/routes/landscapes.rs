//! Landscape health endpoints
//!
//! Read-through views over the per-landscape pollers. Sorting, grouping and
//! filtering happen here on every request and never touch the cache.

use crate::core::cache_manager::CacheStats;
use crate::core::health::{HealthCheckResult, HealthSummary};
use crate::core::poller::PollSnapshot;
use crate::core::projection::{
    GroupedRows, HealthRow, SortColumn, SortDirection, SortState, TeamGroup, ViewOptions,
    group_by_team, hide_central_non_up, materialize_rows, project, sort_rows,
};
use crate::core::registry::Landscape;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::HealthError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configure landscape routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/landscapes", web::get().to(list_landscapes))
            .route("/landscapes/{id}/health", web::get().to(landscape_health))
            .route(
                "/landscapes/{id}/health/refresh",
                web::post().to(refresh_landscape),
            )
            .route(
                "/landscapes/{id}/components/{component_id}/health",
                web::get().to(component_health),
            )
            .route("/cache/stats", web::get().to(cache_stats)),
    );
}

/// Query parameters of the landscape health view
#[derive(Debug, Default, Deserialize)]
pub struct HealthQuery {
    /// Column to sort by; name order when absent
    pub sort: Option<String>,
    pub dir: Option<String>,
    /// `team` groups by owning team, otherwise rows split by library flag
    pub group_by: Option<String>,
    #[serde(default)]
    pub hide_central_down: bool,
    /// Include "not supported" rows for ineligible components
    pub include_unsupported: Option<bool>,
}

impl HealthQuery {
    fn view_options(&self) -> Result<ViewOptions, HealthError> {
        let sort = match &self.sort {
            Some(column) => {
                let column: SortColumn = column.parse()?;
                let direction = match &self.dir {
                    Some(dir) => dir.parse()?,
                    None => SortDirection::Asc,
                };
                SortState::by_column(column, direction)
            }
            None => SortState::default(),
        };
        Ok(ViewOptions {
            sort,
            hide_central_non_up: self.hide_central_down,
        })
    }

    fn group_by_team(&self) -> Result<bool, HealthError> {
        match self.group_by.as_deref() {
            None | Some("library") => Ok(false),
            Some("team") => Ok(true),
            Some(other) => Err(HealthError::validation(format!(
                "unknown group_by value: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "group_by", content = "groups", rename_all = "lowercase")]
pub enum Grouping {
    Library(GroupedRows),
    Team(Vec<TeamGroup>),
}

#[derive(Debug, Serialize)]
pub struct LandscapeHealth {
    pub landscape: Landscape,
    pub summary: HealthSummary,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub poll_id: Option<String>,
    pub error: Option<String>,
    #[serde(flatten)]
    pub grouping: Grouping,
}

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    #[serde(flatten)]
    pub result: HealthCheckResult,
    /// Flattened sub-component statuses as `(path, status)` pairs
    pub details: Vec<(String, String)>,
}

async fn list_landscapes(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Listing landscapes");
    Ok(HttpResponse::Ok().json(ApiResponse::success(&state.registry().landscapes)))
}

async fn landscape_health(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HealthQuery>,
) -> ActixResult<HttpResponse> {
    let landscape_id = path.into_inner();
    let landscape = state.landscape(&landscape_id)?;
    let view = query.view_options()?;
    let by_team = query.group_by_team()?;

    let snapshot = state
        .poller(&landscape_id)
        .poll(
            &state.registry().components,
            landscape,
            &state.poll_options(),
        )
        .await?;

    let body = render(&state, landscape, &snapshot, &query, view, by_team);
    Ok(HttpResponse::Ok().json(ApiResponse::success(body)))
}

async fn refresh_landscape(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let landscape_id = path.into_inner();
    let landscape = state.landscape(&landscape_id)?;
    let poller = state.poller(&landscape_id);
    info!("Manual refresh of landscape {}", landscape_id);

    let snapshot = if poller.snapshot().signature.is_some() {
        poller.refetch().await?
    } else {
        poller
            .poll(
                &state.registry().components,
                landscape,
                &state.poll_options(),
            )
            .await?
    };

    let body = render(
        &state,
        landscape,
        &snapshot,
        &HealthQuery::default(),
        ViewOptions::default(),
        false,
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(body)))
}

async fn component_health(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (landscape_id, component_id) = path.into_inner();
    let landscape = state.landscape(&landscape_id)?;
    let component = state.registry().component(&component_id).ok_or_else(|| {
        HealthError::not_found(format!("Component {} not found", component_id))
    })?;

    let result = state
        .poller(&landscape_id)
        .poll_one(component, landscape, &state.poll_options())
        .await?;

    let details = result
        .response
        .as_ref()
        .map(|payload| payload.flatten())
        .unwrap_or_default();
    Ok(HttpResponse::Ok().json(ApiResponse::success(ComponentHealth { result, details })))
}

async fn cache_stats(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let stats: CacheStats = state.cache.stats();
    let meta = serde_json::json!({
        "entries": state.cache.entry_count(),
        "hit_rate": stats.hit_rate(),
    });
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(stats, meta)))
}

fn render(
    state: &AppState,
    landscape: &Landscape,
    snapshot: &PollSnapshot,
    query: &HealthQuery,
    view: ViewOptions,
    by_team: bool,
) -> LandscapeHealth {
    let registry = state.registry();
    let effective = state.poll_options().effective_landscape(landscape);
    let rows: Vec<HealthRow> = materialize_rows(
        &registry.components,
        &snapshot.results,
        &effective,
        registry.has_central_landscape(),
        &registry.team_names(),
        query.include_unsupported.unwrap_or(true),
    );

    let grouping = if by_team {
        let mut rows = if view.hide_central_non_up {
            hide_central_non_up(rows, effective.is_central)
        } else {
            rows
        };
        sort_rows(&mut rows, &view.sort);
        Grouping::Team(group_by_team(rows))
    } else {
        Grouping::Library(project(rows, effective.is_central, &view))
    };

    LandscapeHealth {
        landscape: landscape.clone(),
        summary: snapshot.summary(),
        is_loading: snapshot.is_loading,
        is_fetching: snapshot.is_fetching,
        last_updated: snapshot.last_updated,
        poll_id: snapshot.poll_id.clone(),
        error: snapshot.error.clone(),
        grouping,
    }
}
