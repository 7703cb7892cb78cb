//! License administration handlers. Global admin only; the services
//! enforce that, handlers just pass context through.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use warden_core::error::AppError;
use warden_entity::license::License;

use crate::dto::request::GrantLicenseRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/licenses
pub async fn list_licenses(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<License>>>, AppError> {
    let licenses = state.license_service.list(auth.context()).await?;
    Ok(Json(ApiResponse::ok(licenses)))
}

/// POST /api/licenses
pub async fn grant_license(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<GrantLicenseRequest>,
) -> Result<Json<ApiResponse<License>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let license = state
        .license_service
        .grant(auth.context(), req.platform_user_id, req.display_name)
        .await?;
    Ok(Json(ApiResponse::ok(license)))
}

/// DELETE /api/licenses/{platform_user_id}
pub async fn revoke_license(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(platform_user_id): Path<i64>,
) -> Result<Json<ApiResponse<License>>, AppError> {
    let license = state
        .license_service
        .revoke(auth.context(), platform_user_id)
        .await?;
    Ok(Json(ApiResponse::ok(license)))
}
