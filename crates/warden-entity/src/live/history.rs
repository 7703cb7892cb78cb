//! Player-count history samples.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One time-series sample of a project's live population.
///
/// Insert-only; samples are throttled against the latest existing
/// point rather than deduplicated after the fact.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHistoryPoint {
    pub id: Uuid,
    pub project_id: Uuid,
    pub player_count: i32,
    pub server_count: i32,
    pub recorded_at: DateTime<Utc>,
}

/// Input for appending one sample.
#[derive(Debug, Clone)]
pub struct CreateHistoryPoint {
    pub project_id: Uuid,
    pub player_count: i32,
    pub server_count: i32,
}
