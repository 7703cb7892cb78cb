//! Heartbeat ingestion and presence window configuration.

use serde::{Deserialize, Serialize};

/// Tuning for the relay heartbeat path.
///
/// Game servers report roughly every 15 seconds. A presence row is
/// "live" while its last heartbeat is inside `live_window_seconds` and
/// is hard-deleted once older than `purge_after_seconds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Freshness window for live server/player reads, in seconds.
    #[serde(default = "default_live_window")]
    pub live_window_seconds: i64,
    /// Age past which presence rows are deleted, in seconds.
    #[serde(default = "default_purge_after")]
    pub purge_after_seconds: i64,
    /// Minimum spacing between player-history samples, in seconds.
    #[serde(default = "default_history_interval")]
    pub history_interval_seconds: i64,
    /// Upper bound on a single avatar thumbnail lookup, in milliseconds.
    #[serde(default = "default_avatar_timeout")]
    pub avatar_timeout_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            live_window_seconds: default_live_window(),
            purge_after_seconds: default_purge_after(),
            history_interval_seconds: default_history_interval(),
            avatar_timeout_ms: default_avatar_timeout(),
        }
    }
}

fn default_live_window() -> i64 {
    45
}

fn default_purge_after() -> i64 {
    60
}

fn default_history_interval() -> i64 {
    30
}

fn default_avatar_timeout() -> u64 {
    2_000
}
