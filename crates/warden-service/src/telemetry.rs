//! Heartbeat ingestion and live presence views.
//!
//! Game servers POST a heartbeat roughly every 15 seconds. Ingestion
//! is deliberately forgiving: after the server row is written, every
//! sub-step (player upserts, avatar lookups, history sampling, stale
//! purge) logs and moves on rather than failing the call.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use warden_auth::rbac::ProjectPermission;
use warden_core::config::TelemetryConfig;
use warden_core::result::AppResult;
use warden_database::repositories::telemetry::TelemetryRepository;
use warden_entity::live::{
    CreateHistoryPoint, LivePlayer, LiveServer, PlayerHistoryPoint, UpsertLivePlayer,
    UpsertLiveServer,
};
use warden_entity::project::Project;
use warden_platform::PlatformGateway;

use crate::access::ProjectAccess;
use crate::context::RequestContext;

/// One player entry inside a heartbeat body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub user_id: i64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// Session play time in seconds.
    #[serde(default)]
    pub play_time: Option<i64>,
    /// Account age in days.
    #[serde(default)]
    pub account_age: Option<i32>,
}

/// Heartbeat body as sent by the in-game reporter script.
///
/// Everything except the server id is optional; servers running older
/// reporter versions send sparse bodies and still count as live.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatReport {
    pub server_id: String,
    #[serde(default)]
    pub place_id: Option<i64>,
    #[serde(default)]
    pub players: Option<i32>,
    #[serde(default)]
    pub max_players: Option<i32>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub ping: Option<i32>,
    #[serde(default)]
    pub uptime: Option<i64>,
    #[serde(default)]
    pub player_list: Option<Vec<PlayerReport>>,
}

/// Live servers and players for the dashboard presence panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSnapshot {
    pub servers: Vec<LiveServer>,
    pub players: Vec<LivePlayer>,
}

/// Heartbeat ingestion plus the dashboard-facing presence reads.
#[derive(Debug, Clone)]
pub struct TelemetryService {
    access: Arc<ProjectAccess>,
    telemetry: Arc<TelemetryRepository>,
    gateway: Arc<dyn PlatformGateway>,
    config: TelemetryConfig,
}

impl TelemetryService {
    /// Creates a new telemetry service.
    pub fn new(
        access: Arc<ProjectAccess>,
        telemetry: Arc<TelemetryRepository>,
        gateway: Arc<dyn PlatformGateway>,
        config: TelemetryConfig,
    ) -> Self {
        Self {
            access,
            telemetry,
            gateway,
            config,
        }
    }

    /// Ingest one heartbeat from an already-authenticated game server.
    ///
    /// Only the server-row upsert can fail the call; everything after
    /// it is best-effort.
    pub async fn ingest_heartbeat(
        &self,
        project: &Project,
        report: HeartbeatReport,
    ) -> AppResult<()> {
        let now = Utc::now();

        self.telemetry
            .upsert_server(&UpsertLiveServer {
                project_id: project.id,
                server_id: report.server_id.clone(),
                place_id: report.place_id.unwrap_or(project.place_id),
                players: report.players.unwrap_or(0),
                max_players: report.max_players.unwrap_or(0),
                fps: report.fps.unwrap_or(60.0),
                ping: report.ping.unwrap_or(0),
                uptime: report.uptime.unwrap_or(0),
            })
            .await?;

        for player in report.player_list.unwrap_or_default() {
            let avatar_url = self.resolve_avatar(player.user_id).await;
            let username = player
                .username
                .unwrap_or_else(|| format!("user_{}", player.user_id));
            let display_name = player.display_name.unwrap_or_else(|| username.clone());
            if let Err(e) = self
                .telemetry
                .upsert_player(&UpsertLivePlayer {
                    project_id: project.id,
                    user_id: player.user_id,
                    server_id: report.server_id.clone(),
                    display_name,
                    username,
                    play_time: player.play_time.unwrap_or(0),
                    account_age: player.account_age.unwrap_or(0),
                    avatar_url,
                })
                .await
            {
                warn!(
                    project_id = %project.id,
                    user_id = player.user_id,
                    error = %e,
                    "Failed to upsert live player"
                );
            }
        }

        self.maybe_sample_history(project.id, now).await;
        self.purge_stale(now).await;

        Ok(())
    }

    /// Live servers and players within the freshness window.
    pub async fn live_view(&self, ctx: &RequestContext, project_id: Uuid) -> AppResult<LiveSnapshot> {
        self.access
            .require(ctx, project_id, ProjectPermission::ViewStats)
            .await?;

        let cutoff = Utc::now() - Duration::seconds(self.config.live_window_seconds);
        let servers = self.telemetry.live_servers(project_id, cutoff).await?;
        let players = self.telemetry.live_players(project_id, cutoff).await?;
        Ok(LiveSnapshot { servers, players })
    }

    /// Player-count history for charting, newest `window_hours` back.
    pub async fn history_view(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        window_hours: i64,
    ) -> AppResult<Vec<PlayerHistoryPoint>> {
        self.access
            .require(ctx, project_id, ProjectPermission::ViewStats)
            .await?;

        let hours = window_hours.clamp(1, 24 * 7);
        let since = Utc::now() - Duration::hours(hours);
        self.telemetry.history_since(project_id, since).await
    }

    /// Avatar thumbnail lookup bounded by its own timeout so a slow
    /// thumbnails API can never stall a heartbeat.
    async fn resolve_avatar(&self, user_id: i64) -> Option<String> {
        let timeout = StdDuration::from_millis(self.config.avatar_timeout_ms);
        match tokio::time::timeout(timeout, self.gateway.avatar_url(user_id)).await {
            Ok(Ok(url)) => url,
            Ok(Err(e)) => {
                debug!(user_id, error = %e, "Avatar lookup failed");
                None
            }
            Err(_) => {
                debug!(user_id, timeout_ms = self.config.avatar_timeout_ms, "Avatar lookup timed out");
                None
            }
        }
    }

    /// Append a history sample if the latest one is old enough.
    /// Read-then-insert; a concurrent heartbeat may double-sample,
    /// which the charting reads tolerate.
    async fn maybe_sample_history(&self, project_id: Uuid, now: DateTime<Utc>) {
        let due = match self.telemetry.latest_history_at(project_id).await {
            Ok(latest) => latest.is_none_or(|at| {
                now - at >= Duration::seconds(self.config.history_interval_seconds)
            }),
            Err(e) => {
                warn!(project_id = %project_id, error = %e, "Failed to read history throttle");
                return;
            }
        };
        if !due {
            return;
        }

        let cutoff = now - Duration::seconds(self.config.live_window_seconds);
        let (player_count, server_count) = match self.telemetry.live_counts(project_id, cutoff).await
        {
            Ok(counts) => counts,
            Err(e) => {
                warn!(project_id = %project_id, error = %e, "Failed to count live rows");
                return;
            }
        };

        if let Err(e) = self
            .telemetry
            .append_history(&CreateHistoryPoint {
                project_id,
                player_count: player_count as i32,
                server_count: server_count as i32,
            })
            .await
        {
            warn!(project_id = %project_id, error = %e, "Failed to append history sample");
        }
    }

    /// Delete presence rows past the purge window.
    async fn purge_stale(&self, now: DateTime<Utc>) {
        let cutoff = now - Duration::seconds(self.config.purge_after_seconds);
        match self.telemetry.purge_stale(cutoff).await {
            Ok((servers, players)) if servers > 0 || players > 0 => {
                debug!(servers, players, "Purged stale presence rows");
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Failed to purge stale presence rows");
            }
        }
    }
}
