//! Action log handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::types::pagination::PageResponse;
use warden_entity::log::ActionLog;

use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/projects/{id}/logs
pub async fn project_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ActionLog>>>, AppError> {
    let page = pagination.into_page_request();
    let logs = state
        .log_service
        .list_project_logs(auth.context(), project_id, &page)
        .await?;
    Ok(Json(ApiResponse::ok(logs)))
}

/// GET /api/logs
pub async fn system_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ActionLog>>>, AppError> {
    let page = pagination.into_page_request();
    let logs = state
        .log_service
        .list_system_logs(auth.context(), &page)
        .await?;
    Ok(Json(ApiResponse::ok(logs)))
}
