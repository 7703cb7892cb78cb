//! Project member entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::MemberRole;

/// A user's membership in one project.
///
/// Unique per (project, user). The owner's row is created together with
/// the project; other rows come from membership management.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    /// Unique membership identifier.
    pub id: Uuid,
    /// The project this membership belongs to.
    pub project_id: Uuid,
    /// The member's operator account id.
    pub user_id: Uuid,
    /// Role held within this project.
    pub role: MemberRole,
    /// When the member joined.
    pub joined_at: DateTime<Utc>,
}

/// Membership joined with its user's profile, for member listings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetails {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    /// Platform account id of the member.
    pub platform_user_id: i64,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}
