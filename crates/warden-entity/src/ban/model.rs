//! Ban records and inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BanDuration;

/// A ban row. At most one ban per (project, target) is active at a
/// time; older rows stay around as history.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ban {
    pub id: Uuid,
    pub project_id: Uuid,
    /// Platform user id of the banned player.
    pub target_user_id: i64,
    pub target_name: String,
    /// Dashboard account that issued the ban.
    pub issuer_id: Uuid,
    pub issuer_name: String,
    /// Reason shown to the banned player.
    pub reason: String,
    /// Internal note, never sent to game servers.
    pub private_reason: Option<String>,
    pub duration: BanDuration,
    /// Ban length in seconds; `None` for permanent bans.
    pub duration_seconds: Option<i64>,
    /// Absolute expiry; `None` for permanent bans.
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Ban {
    /// Whether this ban should keep the player out at `now`.
    ///
    /// Expiry is evaluated lazily: an `active` row whose expiry has
    /// passed no longer enforces, even before anything flips the flag.
    pub fn is_enforced(&self, now: DateTime<Utc>) -> bool {
        self.active && self.expires_at.is_none_or(|expires| expires > now)
    }
}

/// Input for issuing a new ban.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBan {
    pub target_user_id: i64,
    pub target_name: String,
    pub reason: String,
    #[serde(default)]
    pub private_reason: Option<String>,
    pub duration: BanDuration,
    /// Required when `duration` is `custom`.
    #[serde(default)]
    pub custom_expiry: Option<DateTime<Utc>>,
}
