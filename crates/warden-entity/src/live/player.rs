//! Live in-game player presence rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One player currently in-game, keyed by (user_id, project_id).
///
/// Same freshness and deletion windows as [`super::LiveServer`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LivePlayer {
    pub id: Uuid,
    pub project_id: Uuid,
    /// Platform user id of the player.
    pub user_id: i64,
    /// Server the player was last seen on.
    pub server_id: String,
    pub display_name: String,
    pub username: String,
    /// Seconds spent in the current session.
    pub play_time: i64,
    /// Account age in days, as reported by the game server.
    pub account_age: i32,
    /// Resolved headshot URL; `None` when the thumbnail lookup failed.
    pub avatar_url: Option<String>,
    pub last_heartbeat: DateTime<Utc>,
}

/// Upsert input for one reported player.
#[derive(Debug, Clone)]
pub struct UpsertLivePlayer {
    pub project_id: Uuid,
    pub user_id: i64,
    pub server_id: String,
    pub display_name: String,
    pub username: String,
    pub play_time: i64,
    pub account_age: i32,
    pub avatar_url: Option<String>,
}
