//! Moderation handler — the single command dispatch endpoint.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use warden_core::error::AppError;
use warden_service::moderation::{CommandOutcome, ModerationRequest};

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/projects/{id}/commands
pub async fn execute_command(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
    Json(req): Json<ModerationRequest>,
) -> Result<Json<ApiResponse<CommandOutcome>>, AppError> {
    let outcome = state
        .moderation_service
        .execute(auth.context(), project_id, req)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
