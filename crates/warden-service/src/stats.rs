//! Aggregate stats for the dashboard overview.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use warden_auth::rbac::ProjectPermission;
use warden_core::config::TelemetryConfig;
use warden_core::result::AppResult;
use warden_database::repositories::telemetry::TelemetryRepository;
use warden_platform::{PlatformGateway, PlatformServer};

use crate::access::ProjectAccess;
use crate::context::RequestContext;

/// Headline numbers for a project: local live counts plus the
/// platform's own aggregates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    /// Players seen by heartbeats inside the freshness window.
    pub live_players: i64,
    /// Servers seen by heartbeats inside the freshness window.
    pub live_servers: i64,
    /// Platform-reported concurrent player count.
    pub playing: i64,
    pub visits: i64,
    pub favorites: i64,
    pub up_votes: i64,
    pub down_votes: i64,
}

/// Read-only stats views. The platform calls here are the expensive
/// ones the rate limiter sits in front of.
#[derive(Debug, Clone)]
pub struct StatsService {
    access: Arc<ProjectAccess>,
    telemetry: Arc<TelemetryRepository>,
    gateway: Arc<dyn PlatformGateway>,
    config: TelemetryConfig,
}

impl StatsService {
    /// Creates a new stats service.
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

    /// The overview numbers. Platform failures surface as upstream
    /// errors; the dashboard shows a retry state rather than zeros
    /// that look like an empty game.
    pub async fn overview(&self, ctx: &RequestContext, project_id: Uuid) -> AppResult<StatsOverview> {
        let (project, _role) = self
            .access
            .require(ctx, project_id, ProjectPermission::ViewStats)
            .await?;

        let cutoff = Utc::now() - Duration::seconds(self.config.live_window_seconds);
        let (live_players, live_servers) = self.telemetry.live_counts(project.id, cutoff).await?;

        let stats = self
            .gateway
            .fetch_stats(project.universe_id, &project.api_key)
            .await?;
        let votes = self
            .gateway
            .fetch_votes(project.universe_id, &project.api_key)
            .await?;

        Ok(StatsOverview {
            live_players,
            live_servers,
            playing: stats.playing,
            visits: stats.visits,
            favorites: stats.favorites,
            up_votes: votes.up_votes,
            down_votes: votes.down_votes,
        })
    }

    /// The platform's own public server list for the project's place.
    /// Complements the heartbeat-fed list with servers that never
    /// report (e.g. ones running a build without the reporter).
    pub async fn platform_servers(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> AppResult<Vec<PlatformServer>> {
        let (project, _role) = self
            .access
            .require(ctx, project_id, ProjectPermission::ViewStats)
            .await?;

        self.gateway
            .fetch_servers(project.place_id, &project.api_key)
            .await
    }
}
