//! Auth handlers — session issuance and current user.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use validator::Validate;

use warden_core::error::AppError;
use warden_service::auth::PlatformIdentity;

use crate::dto::request::SignInRequest;
use crate::dto::response::{ApiResponse, SessionResponse};
use crate::extractors::AuthUser;
use crate::extractors::auth::client_ip;
use crate::state::AppState;

/// POST /api/auth/session
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SignInRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let identity = PlatformIdentity {
        platform_user_id: req.platform_user_id,
        username: req.username,
        display_name: req.display_name,
        avatar_url: req.avatar_url,
    };

    let (user, issued) = state
        .auth_service
        .sign_in(identity, client_ip(&headers))
        .await?;

    Ok(Json(ApiResponse::ok(SessionResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user,
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<warden_entity::user::User>>, AppError> {
    let user = state
        .auth_service
        .current_user(auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Account no longer exists"))?;

    Ok(Json(ApiResponse::ok(user)))
}
