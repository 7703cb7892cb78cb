//! Ban handlers — list, inspect, lift.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::types::pagination::PageResponse;
use warden_entity::ban::Ban;

use crate::dto::request::BanListQuery;
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/projects/{id}/bans
pub async fn list_bans(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
    Query(filter): Query<BanListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Ban>>>, AppError> {
    let page = pagination.into_page_request();
    let bans = state
        .ban_service
        .list_bans(auth.context(), project_id, filter.active_only, &page)
        .await?;
    Ok(Json(ApiResponse::ok(bans)))
}

/// GET /api/projects/{id}/bans/{ban_id}
pub async fn get_ban(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, ban_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<Ban>>, AppError> {
    let ban = state
        .ban_service
        .get_ban(auth.context(), project_id, ban_id)
        .await?;
    Ok(Json(ApiResponse::ok(ban)))
}

/// DELETE /api/projects/{id}/bans/{ban_id}
pub async fn lift_ban(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, ban_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<Ban>>, AppError> {
    let ban = state
        .ban_service
        .lift_ban(auth.context(), project_id, ban_id)
        .await?;
    Ok(Json(ApiResponse::ok(ban)))
}
