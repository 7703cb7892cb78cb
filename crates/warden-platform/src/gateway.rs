//! Platform gateway trait for pluggable platform backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use warden_core::result::AppResult;

/// A platform-level ban request forwarded to the enforcement API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcementRequest {
    pub universe_id: i64,
    pub user_id: i64,
    pub reason: String,
    pub private_reason: Option<String>,
    /// Ban length in seconds; `None` for permanent.
    pub duration_seconds: Option<i64>,
}

/// One running server instance as reported by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformServer {
    pub id: String,
    pub playing: i32,
    pub max_players: i32,
    pub fps: Option<f64>,
    pub ping: Option<i32>,
}

/// Aggregate game stats from the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub playing: i64,
    pub visits: i64,
    pub favorites: i64,
}

/// Like/dislike counters from the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformVotes {
    pub up_votes: i64,
    pub down_votes: i64,
}

/// Trait for the external platform's HTTP surface.
///
/// Implementations exist for the real HTTP APIs and an in-memory
/// mock. Enforcement and messaging calls are best-effort from the
/// caller's point of view: callers decide whether a failure aborts
/// their own work, this trait only reports it.
#[async_trait]
pub trait PlatformGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Return the gateway type name (e.g., "http", "mock").
    fn gateway_type(&self) -> &str;

    /// Ban a user at the platform level so joins are rejected.
    async fn ban_user(&self, request: &EnforcementRequest, api_key: &str) -> AppResult<()>;

    /// Lift a platform-level ban.
    async fn unban_user(&self, universe_id: i64, user_id: i64, api_key: &str) -> AppResult<()>;

    /// Publish a JSON message to a pub/sub topic of a universe.
    async fn publish_message(
        &self,
        universe_id: i64,
        topic: &str,
        message: &Value,
        api_key: &str,
    ) -> AppResult<()>;

    /// List public server instances of a place.
    async fn fetch_servers(&self, place_id: i64, api_key: &str) -> AppResult<Vec<PlatformServer>>;

    /// Fetch aggregate stats for a universe.
    async fn fetch_stats(&self, universe_id: i64, api_key: &str) -> AppResult<PlatformStats>;

    /// Fetch vote counters for a universe.
    async fn fetch_votes(&self, universe_id: i64, api_key: &str) -> AppResult<PlatformVotes>;

    /// Resolve a user's avatar headshot URL. `Ok(None)` when the
    /// thumbnail is not (yet) available.
    async fn avatar_url(&self, user_id: i64) -> AppResult<Option<String>>;
}
