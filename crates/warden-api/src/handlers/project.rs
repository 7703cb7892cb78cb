//! Project handlers — CRUD, overview, API key rotation.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use warden_auth::rbac::ProjectPermission;
use warden_core::error::AppError;
use warden_entity::member::MemberRole;
use warden_entity::project::{CreateProject, Project, UpdateProject};

use crate::dto::response::{ApiResponse, MessageResponse, ProjectResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Project>>>, AppError> {
    let projects = state.project_service.list_mine(auth.context()).await?;
    Ok(Json(ApiResponse::ok(projects)))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProject>,
) -> Result<Json<ApiResponse<ProjectResponse>>, AppError> {
    let project = state.project_service.create(auth.context(), req).await?;

    // The creator is the owner and sees the key once, right away.
    Ok(Json(ApiResponse::ok(ProjectResponse::from_project(
        &project,
        MemberRole::Owner,
        true,
    ))))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProjectResponse>>, AppError> {
    let (project, role) = state
        .project_service
        .overview(auth.context(), project_id)
        .await?;

    let reveal_key = state
        .rbac_enforcer
        .has_permission(&role, &ProjectPermission::ManageApiKey);

    Ok(Json(ApiResponse::ok(ProjectResponse::from_project(
        &project, role, reveal_key,
    ))))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
    Json(req): Json<UpdateProject>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let project = state
        .project_service
        .update(auth.context(), project_id, req)
        .await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// POST /api/projects/{id}/rotate-key
pub async fn rotate_key(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProjectResponse>>, AppError> {
    let project = state
        .project_service
        .rotate_key(auth.context(), project_id)
        .await?;

    Ok(Json(ApiResponse::ok(ProjectResponse::from_project(
        &project,
        MemberRole::Owner,
        true,
    ))))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .project_service
        .delete(auth.context(), project_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Project deleted".to_string(),
    })))
}
