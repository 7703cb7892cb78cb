//! Relay handlers — the endpoints game servers call directly.
//!
//! No session here: each request authenticates with the project's API
//! key. Responses are flat JSON (no success envelope) because the
//! in-game reporter script predates the dashboard response format.

use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use uuid::Uuid;

use warden_auth::apikey;
use warden_core::error::AppError;
use warden_entity::project::Project;
use warden_service::ban::CheckBanResponse;
use warden_service::telemetry::HeartbeatReport;

use crate::dto::request::{CheckBanQuery, HeartbeatRequest};
use crate::dto::response::OkResponse;
use crate::extractors::RelayKey;
use crate::state::AppState;

/// POST /relay/heartbeat
pub async fn heartbeat(
    State(state): State<AppState>,
    RelayKey(key): RelayKey,
    Json(req): Json<HeartbeatRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let project_id = req
        .project_id
        .ok_or_else(|| AppError::validation("Missing project id"))?;
    let server_id = req
        .server_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation("Missing server id"))?
        .to_string();

    let project = authorize_project(&state, &key, project_id).await?;

    state
        .telemetry_service
        .ingest_heartbeat(
            &project,
            HeartbeatReport {
                server_id,
                place_id: req.place_id,
                players: req.players,
                max_players: req.max_players,
                fps: req.fps,
                ping: req.ping,
                uptime: req.uptime,
                player_list: req.player_list,
            },
        )
        .await?;

    Ok(Json(OkResponse { ok: true }))
}

/// GET /relay/check-ban
pub async fn check_ban(
    State(state): State<AppState>,
    RelayKey(key): RelayKey,
    Query(query): Query<CheckBanQuery>,
) -> Result<Json<CheckBanResponse>, AppError> {
    let project_id = query
        .project_id
        .ok_or_else(|| AppError::validation("Missing project id"))?;
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::validation("Missing user id"))?;

    let project = authorize_project(&state, &key, project_id).await?;

    let response = state
        .ban_service
        .check_ban(&project, user_id, Utc::now())
        .await?;

    Ok(Json(response))
}

/// Resolve the project and match the presented key against its stored
/// one. An unknown project and a wrong key are indistinguishable to
/// the caller.
async fn authorize_project(
    state: &AppState,
    presented_key: &str,
    project_id: Uuid,
) -> Result<Project, AppError> {
    let project = state
        .project_repo
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| AppError::forbidden("Invalid API key"))?;

    if !apikey::verify_key(presented_key, &project.api_key) {
        return Err(AppError::forbidden("Invalid API key"));
    }

    Ok(project)
}
