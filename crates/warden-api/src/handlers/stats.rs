//! Stats handlers — overview numbers, live presence, history.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use warden_core::error::AppError;
use warden_entity::live::PlayerHistoryPoint;
use warden_platform::PlatformServer;
use warden_service::stats::StatsOverview;
use warden_service::telemetry::LiveSnapshot;

use crate::dto::request::HistoryQuery;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/projects/{id}/stats
///
/// Rate-limited: every call fans out to the platform's APIs.
pub async fn overview(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ApiResponse<StatsOverview>>, AppError> {
    state
        .rate_limiter
        .check(&auth.user_id.to_string(), "stats")
        .await?;

    let stats = state
        .stats_service
        .overview(auth.context(), project_id)
        .await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/projects/{id}/servers
///
/// Rate-limited for the same reason as the stats overview.
pub async fn platform_servers(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<PlatformServer>>>, AppError> {
    state
        .rate_limiter
        .check(&auth.user_id.to_string(), "servers")
        .await?;

    let servers = state
        .stats_service
        .platform_servers(auth.context(), project_id)
        .await?;
    Ok(Json(ApiResponse::ok(servers)))
}

/// GET /api/projects/{id}/live
pub async fn live_view(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ApiResponse<LiveSnapshot>>, AppError> {
    let snapshot = state
        .telemetry_service
        .live_view(auth.context(), project_id)
        .await?;
    Ok(Json(ApiResponse::ok(snapshot)))
}

/// GET /api/projects/{id}/history
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<PlayerHistoryPoint>>>, AppError> {
    let points = state
        .telemetry_service
        .history_view(auth.context(), project_id, query.hours)
        .await?;
    Ok(Json(ApiResponse::ok(points)))
}
