//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warden_entity::member::MemberRole;
use warden_entity::project::Project;
use warden_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Acknowledgement body for the relay heartbeat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    /// Always true on success paths.
    pub ok: bool,
}

/// Session issuance response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Bearer token for subsequent dashboard calls.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The signed-in account.
    pub user: User,
}

/// Project with the caller's role and an appropriately redacted key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub universe_id: i64,
    pub place_id: i64,
    /// Full key for holders of `ManageApiKey`, redacted otherwise.
    pub api_key: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// The caller's role in this project.
    pub role: MemberRole,
}

impl ProjectResponse {
    /// Builds the response, revealing the key only when allowed.
    pub fn from_project(project: &Project, role: MemberRole, reveal_key: bool) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            universe_id: project.universe_id,
            place_id: project.place_id,
            api_key: if reveal_key {
                project.api_key.clone()
            } else {
                project.redacted_key()
            },
            owner_id: project.owner_id,
            created_at: project.created_at,
            updated_at: project.updated_at,
            role,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
}
