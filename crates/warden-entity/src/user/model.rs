//! User accounts backing dashboard sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dashboard account, created on first sign-in from the platform
/// identity and refreshed on every subsequent sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Platform user id; unique across accounts.
    pub platform_user_id: i64,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub is_global_admin: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

/// Identity payload upserted at sign-in.
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub platform_user_id: i64,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}
