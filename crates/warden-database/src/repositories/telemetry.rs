//! Live presence and history repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_entity::live::{
    CreateHistoryPoint, LivePlayer, LiveServer, PlayerHistoryPoint, UpsertLivePlayer,
    UpsertLiveServer,
};

/// Repository for heartbeat-fed presence rows and history samples.
#[derive(Debug, Clone)]
pub struct TelemetryRepository {
    pool: PgPool,
}

impl TelemetryRepository {
    /// Create a new telemetry repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert one server row keyed by (project_id, server_id).
    /// Counters are snapshots, so last write wins.
    pub async fn upsert_server(&self, data: &UpsertLiveServer) -> AppResult<LiveServer> {
        sqlx::query_as::<_, LiveServer>(
            "INSERT INTO live_servers (project_id, server_id, place_id, players, max_players, fps, ping, uptime, last_heartbeat) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW()) \
             ON CONFLICT (project_id, server_id) DO UPDATE SET \
                 place_id = EXCLUDED.place_id, \
                 players = EXCLUDED.players, \
                 max_players = EXCLUDED.max_players, \
                 fps = EXCLUDED.fps, \
                 ping = EXCLUDED.ping, \
                 uptime = EXCLUDED.uptime, \
                 last_heartbeat = NOW() \
             RETURNING *",
        )
        .bind(data.project_id)
        .bind(&data.server_id)
        .bind(data.place_id)
        .bind(data.players)
        .bind(data.max_players)
        .bind(data.fps)
        .bind(data.ping)
        .bind(data.uptime)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert live server", e))
    }

    /// Upsert one player row keyed by (project_id, user_id).
    pub async fn upsert_player(&self, data: &UpsertLivePlayer) -> AppResult<LivePlayer> {
        sqlx::query_as::<_, LivePlayer>(
            "INSERT INTO live_players (project_id, user_id, server_id, display_name, username, play_time, account_age, avatar_url, last_heartbeat) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW()) \
             ON CONFLICT (project_id, user_id) DO UPDATE SET \
                 server_id = EXCLUDED.server_id, \
                 display_name = EXCLUDED.display_name, \
                 username = EXCLUDED.username, \
                 play_time = EXCLUDED.play_time, \
                 account_age = EXCLUDED.account_age, \
                 avatar_url = COALESCE(EXCLUDED.avatar_url, live_players.avatar_url), \
                 last_heartbeat = NOW() \
             RETURNING *",
        )
        .bind(data.project_id)
        .bind(data.user_id)
        .bind(&data.server_id)
        .bind(&data.display_name)
        .bind(&data.username)
        .bind(data.play_time)
        .bind(data.account_age)
        .bind(&data.avatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert live player", e))
    }

    /// Servers whose last heartbeat is at or after `cutoff`.
    pub async fn live_servers(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<LiveServer>> {
        sqlx::query_as::<_, LiveServer>(
            "SELECT * FROM live_servers \
             WHERE project_id = $1 AND last_heartbeat >= $2 \
             ORDER BY players DESC",
        )
        .bind(project_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list live servers", e))
    }

    /// Players whose last heartbeat is at or after `cutoff`.
    pub async fn live_players(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<LivePlayer>> {
        sqlx::query_as::<_, LivePlayer>(
            "SELECT * FROM live_players \
             WHERE project_id = $1 AND last_heartbeat >= $2 \
             ORDER BY display_name ASC",
        )
        .bind(project_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list live players", e))
    }

    /// Live player and server counts for a project at `cutoff` freshness.
    pub async fn live_counts(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<(i64, i64)> {
        let players: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM live_players WHERE project_id = $1 AND last_heartbeat >= $2",
        )
        .bind(project_id)
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count live players", e))?;

        let servers: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM live_servers WHERE project_id = $1 AND last_heartbeat >= $2",
        )
        .bind(project_id)
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count live servers", e))?;

        Ok((players, servers))
    }

    /// Timestamp of the newest history sample for a project.
    pub async fn latest_history_at(&self, project_id: Uuid) -> AppResult<Option<DateTime<Utc>>> {
        sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            "SELECT MAX(recorded_at) FROM player_history WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read latest history", e)
        })
    }

    /// Append one history sample.
    pub async fn append_history(&self, data: &CreateHistoryPoint) -> AppResult<PlayerHistoryPoint> {
        sqlx::query_as::<_, PlayerHistoryPoint>(
            "INSERT INTO player_history (project_id, player_count, server_count) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.project_id)
        .bind(data.player_count)
        .bind(data.server_count)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append history", e))
    }

    /// History samples since `since`, oldest first, for charting.
    pub async fn history_since(
        &self,
        project_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<PlayerHistoryPoint>> {
        sqlx::query_as::<_, PlayerHistoryPoint>(
            "SELECT * FROM player_history \
             WHERE project_id = $1 AND recorded_at >= $2 \
             ORDER BY recorded_at ASC",
        )
        .bind(project_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read history", e))
    }

    /// Delete presence rows with a heartbeat older than `cutoff`.
    /// Returns (servers deleted, players deleted).
    pub async fn purge_stale(&self, cutoff: DateTime<Utc>) -> AppResult<(u64, u64)> {
        let servers = sqlx::query("DELETE FROM live_servers WHERE last_heartbeat < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge stale servers", e)
            })?
            .rows_affected();

        let players = sqlx::query("DELETE FROM live_players WHERE last_heartbeat < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge stale players", e)
            })?
            .rows_affected();

        Ok((servers, players))
    }
}
