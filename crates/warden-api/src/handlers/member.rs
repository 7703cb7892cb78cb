//! Membership handlers — roster and role management.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use warden_core::error::AppError;
use warden_entity::member::{MemberDetails, ProjectMember};

use crate::dto::request::{AddMemberRequest, ChangeRoleRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/projects/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MemberDetails>>>, AppError> {
    let members = state
        .membership_service
        .list(auth.context(), project_id)
        .await?;
    Ok(Json(ApiResponse::ok(members)))
}

/// POST /api/projects/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<ApiResponse<ProjectMember>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let member = state
        .membership_service
        .add(auth.context(), project_id, req.platform_user_id, req.role)
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// PUT /api/projects/{id}/members/{user_id}
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<ProjectMember>>, AppError> {
    let member = state
        .membership_service
        .change_role(auth.context(), project_id, user_id, req.role)
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// DELETE /api/projects/{id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .membership_service
        .remove(auth.context(), project_id, user_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Member removed".to_string(),
    })))
}
