//! Dashboard access licenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A grant allowing one platform identity to sign in to the dashboard.
///
/// Licenses are global, independent of any project membership. The
/// configured global admin is implicitly licensed and receives a row
/// on first sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: Uuid,
    /// Platform user id the grant applies to.
    pub platform_user_id: i64,
    pub display_name: String,
    pub granted_by_id: Option<Uuid>,
    pub granted_by_name: String,
    pub granted_at: DateTime<Utc>,
    pub active: bool,
}

/// Input for granting a license.
#[derive(Debug, Clone)]
pub struct CreateLicense {
    pub platform_user_id: i64,
    pub display_name: String,
    pub granted_by_id: Option<Uuid>,
    pub granted_by_name: String,
}
