//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use warden_entity::member::MemberRole;
use warden_service::telemetry::PlayerReport;

/// Session issuance request body.
///
/// Carries the platform identity already verified by the OAuth front
/// door that proxies to this service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    /// Platform user id.
    #[validate(range(min = 1, message = "A valid platform user id is required"))]
    pub platform_user_id: i64,
    /// Platform username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Platform display name.
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
    /// Avatar URL, if the front door resolved one.
    pub avatar_url: Option<String>,
}

/// Add-member request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    /// Platform user id of the account to add.
    #[validate(range(min = 1, message = "A valid platform user id is required"))]
    pub platform_user_id: i64,
    /// Role to grant.
    pub role: MemberRole,
}

/// Change-role request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleRequest {
    /// New role.
    pub role: MemberRole,
}

/// License grant request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GrantLicenseRequest {
    /// Platform user id to license.
    #[validate(range(min = 1, message = "A valid platform user id is required"))]
    pub platform_user_id: i64,
    /// Display name recorded on the license row.
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
}

/// Heartbeat request body from a game server.
///
/// Ids are optional at the decode stage so their absence maps to a
/// validation error with a usable message instead of a serde reject.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    #[serde(default)]
    pub project_id: Option<Uuid>,
    #[serde(default)]
    pub server_id: Option<String>,
    #[serde(default)]
    pub place_id: Option<i64>,
    #[serde(default)]
    pub players: Option<i32>,
    #[serde(default)]
    pub max_players: Option<i32>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub ping: Option<i32>,
    #[serde(default)]
    pub uptime: Option<i64>,
    #[serde(default)]
    pub player_list: Option<Vec<PlayerReport>>,
}

/// Query parameters for the relay check-ban lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckBanQuery {
    #[serde(default)]
    pub project_id: Option<Uuid>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Query parameters for the ban list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanListQuery {
    /// Only bans still marked active.
    #[serde(default)]
    pub active_only: bool,
}

/// Query parameters for the player history series.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    /// How far back to chart, in hours.
    #[serde(default = "default_history_hours")]
    pub hours: i64,
}

fn default_history_hours() -> i64 {
    24
}
