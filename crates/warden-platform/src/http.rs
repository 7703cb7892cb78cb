//! HTTP implementation of the platform gateway.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use warden_core::config::PlatformConfig;
use warden_core::error::AppError;
use warden_core::result::AppResult;

use crate::gateway::{
    EnforcementRequest, PlatformGateway, PlatformServer, PlatformStats, PlatformVotes,
};

/// Talks to the real platform APIs over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPlatformGateway {
    client: reqwest::Client,
    enforcement_base_url: String,
    messaging_base_url: String,
    games_base_url: String,
    thumbnails_base_url: String,
}

impl HttpPlatformGateway {
    /// Create a gateway from platform configuration.
    pub fn new(config: &PlatformConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("HTTP client error: {e}")))?;

        Ok(Self {
            client,
            enforcement_base_url: config.enforcement_base_url.clone(),
            messaging_base_url: config.messaging_base_url.clone(),
            games_base_url: config.games_base_url.clone(),
            thumbnails_base_url: config.thumbnails_base_url.clone(),
        })
    }

    /// POST a JSON body and treat any non-2xx response as upstream failure.
    async fn post_json(&self, url: &str, body: &Value, context: &str) -> AppResult<()> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("{context} request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(%status, context, "platform call rejected");
            return Err(AppError::upstream(format!(
                "{context} rejected with status {status}: {text}"
            )));
        }

        debug!(context, "platform call succeeded");
        Ok(())
    }
}

/// Envelope used by the platform's list-style read endpoints.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerEntry {
    id: String,
    playing: Option<i32>,
    max_players: Option<i32>,
    fps: Option<f64>,
    ping: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsEntry {
    playing: Option<i64>,
    visits: Option<i64>,
    favorited_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VotesEntry {
    up_votes: Option<i64>,
    down_votes: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThumbnailEntry {
    state: String,
    image_url: Option<String>,
}

#[async_trait]
impl PlatformGateway for HttpPlatformGateway {
    fn gateway_type(&self) -> &str {
        "http"
    }

    async fn ban_user(&self, request: &EnforcementRequest, api_key: &str) -> AppResult<()> {
        let url = format!("{}/ban", self.enforcement_base_url);
        let body = json!({
            "universeId": request.universe_id,
            "userId": request.user_id,
            "reason": request.reason,
            "privateReason": request.private_reason,
            "durationSeconds": request.duration_seconds,
            "apiKey": api_key,
        });
        self.post_json(&url, &body, "enforcement ban").await
    }

    async fn unban_user(&self, universe_id: i64, user_id: i64, api_key: &str) -> AppResult<()> {
        let url = format!("{}/unban", self.enforcement_base_url);
        let body = json!({
            "universeId": universe_id,
            "userId": user_id,
            "apiKey": api_key,
        });
        self.post_json(&url, &body, "enforcement unban").await
    }

    async fn publish_message(
        &self,
        universe_id: i64,
        topic: &str,
        message: &Value,
        api_key: &str,
    ) -> AppResult<()> {
        let url = format!(
            "{}/universes/{universe_id}/topics/{topic}:publish",
            self.messaging_base_url
        );
        // The topic carries JSON-encoded commands as a string payload.
        let body = json!({
            "message": message.to_string(),
            "apiKey": api_key,
        });
        self.post_json(&url, &body, "topic publish").await
    }

    async fn fetch_servers(&self, place_id: i64, api_key: &str) -> AppResult<Vec<PlatformServer>> {
        let url = format!(
            "{}/v1/games/{place_id}/servers/Public?limit=100",
            self.games_base_url
        );
        let envelope: DataEnvelope<ServerEntry> = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("server list request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::upstream(format!("server list rejected: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("server list parse failed: {e}")))?;

        Ok(envelope
            .data
            .into_iter()
            .map(|entry| PlatformServer {
                id: entry.id,
                playing: entry.playing.unwrap_or(0),
                max_players: entry.max_players.unwrap_or(0),
                fps: entry.fps,
                ping: entry.ping,
            })
            .collect())
    }

    async fn fetch_stats(&self, universe_id: i64, api_key: &str) -> AppResult<PlatformStats> {
        let url = format!("{}/v1/games?universeIds={universe_id}", self.games_base_url);
        let envelope: DataEnvelope<StatsEntry> = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("stats request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::upstream(format!("stats rejected: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("stats parse failed: {e}")))?;

        let entry = envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AppError::upstream("stats response contained no entries"))?;

        Ok(PlatformStats {
            playing: entry.playing.unwrap_or(0),
            visits: entry.visits.unwrap_or(0),
            favorites: entry.favorited_count.unwrap_or(0),
        })
    }

    async fn fetch_votes(&self, universe_id: i64, api_key: &str) -> AppResult<PlatformVotes> {
        let url = format!(
            "{}/v1/games/votes?universeIds={universe_id}",
            self.games_base_url
        );
        let envelope: DataEnvelope<VotesEntry> = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("votes request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::upstream(format!("votes rejected: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("votes parse failed: {e}")))?;

        let entry = envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AppError::upstream("votes response contained no entries"))?;

        Ok(PlatformVotes {
            up_votes: entry.up_votes.unwrap_or(0),
            down_votes: entry.down_votes.unwrap_or(0),
        })
    }

    async fn avatar_url(&self, user_id: i64) -> AppResult<Option<String>> {
        let url = format!(
            "{}/v1/users/avatar-headshot?userIds={user_id}&size=150x150&format=Png",
            self.thumbnails_base_url
        );
        let envelope: DataEnvelope<ThumbnailEntry> = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("thumbnail request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::upstream(format!("thumbnail rejected: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("thumbnail parse failed: {e}")))?;

        Ok(envelope
            .data
            .into_iter()
            .next()
            .filter(|entry| entry.state == "Completed")
            .and_then(|entry| entry.image_url))
    }
}
