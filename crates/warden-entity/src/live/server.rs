//! Live game-server presence rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One running server instance, keyed by (server_id, project_id).
///
/// Rows are snapshots, refreshed wholesale on every heartbeat. A row
/// counts as live only while its heartbeat is fresh; stale rows are
/// deleted opportunistically rather than by a scheduler.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LiveServer {
    pub id: Uuid,
    pub project_id: Uuid,
    /// Platform job/server identifier reported by the game process.
    pub server_id: String,
    pub place_id: i64,
    pub players: i32,
    pub max_players: i32,
    pub fps: f64,
    pub ping: i32,
    /// Seconds since the server process started.
    pub uptime: i64,
    pub last_heartbeat: DateTime<Utc>,
}

impl LiveServer {
    /// Whether this row is fresh enough to show as live.
    pub fn is_live(&self, now: DateTime<Utc>, live_window_seconds: i64) -> bool {
        now - self.last_heartbeat <= chrono::Duration::seconds(live_window_seconds)
    }
}

/// Upsert input derived from one heartbeat report.
#[derive(Debug, Clone)]
pub struct UpsertLiveServer {
    pub project_id: Uuid,
    pub server_id: String,
    pub place_id: i64,
    pub players: i32,
    pub max_players: i32,
    pub fps: f64,
    pub ping: i32,
    pub uptime: i64,
}
