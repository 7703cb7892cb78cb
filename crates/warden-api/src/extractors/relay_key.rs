//! `RelayKey` extractor — the `x-api-key` header game servers send.
//!
//! Only presence is checked here; matching the key against a project
//! is done per-request in the relay handlers so a missing header and a
//! wrong key map to different status codes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use warden_core::error::AppError;

use crate::state::AppState;

/// The presented relay API key, unverified.
#[derive(Debug, Clone)]
pub struct RelayKey(pub String);

impl FromRequestParts<AppState> for RelayKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::unauthorized("Missing x-api-key header"))?;

        Ok(RelayKey(key.to_string()))
    }
}
