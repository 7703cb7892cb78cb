//! Ban repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_core::types::pagination::{PageRequest, PageResponse};
use warden_entity::ban::{Ban, BanDuration};

/// Everything a new ban row needs, with the duration already resolved.
#[derive(Debug, Clone)]
pub struct NewBanRow {
    pub project_id: Uuid,
    pub target_user_id: i64,
    pub target_name: String,
    pub issuer_id: Uuid,
    pub issuer_name: String,
    pub reason: String,
    pub private_reason: Option<String>,
    pub duration: BanDuration,
    pub duration_seconds: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Repository for ban records and their lifecycle.
#[derive(Debug, Clone)]
pub struct BanRepository {
    pool: PgPool,
}

impl BanRepository {
    /// Create a new ban repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a ban by primary key.
    pub async fn find_by_id(&self, project_id: Uuid, id: Uuid) -> AppResult<Option<Ban>> {
        sqlx::query_as::<_, Ban>("SELECT * FROM bans WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ban by id", e))
    }

    /// Latest active ban for a target, if any.
    pub async fn find_active_for_target(
        &self,
        project_id: Uuid,
        target_user_id: i64,
    ) -> AppResult<Option<Ban>> {
        sqlx::query_as::<_, Ban>(
            "SELECT * FROM bans \
             WHERE project_id = $1 AND target_user_id = $2 AND active = TRUE \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(project_id)
        .bind(target_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find active ban", e))
    }

    /// Latest ban for a target regardless of state. The check-ban
    /// endpoint uses this to distinguish "never banned" from
    /// "previously banned, since lifted".
    pub async fn find_latest_for_target(
        &self,
        project_id: Uuid,
        target_user_id: i64,
    ) -> AppResult<Option<Ban>> {
        sqlx::query_as::<_, Ban>(
            "SELECT * FROM bans \
             WHERE project_id = $1 AND target_user_id = $2 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(project_id)
        .bind(target_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find latest ban", e))
    }

    /// Issue a new ban, deactivating any currently-active ban for the
    /// same target first.
    ///
    /// Both statements run in one transaction so concurrent issuance
    /// can never leave two active rows for one (project, target); the
    /// partial unique index on active bans backs this up at the schema
    /// level.
    pub async fn issue(&self, data: &NewBanRow) -> AppResult<Ban> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(
            "UPDATE bans SET active = FALSE \
             WHERE project_id = $1 AND target_user_id = $2 AND active = TRUE",
        )
        .bind(data.project_id)
        .bind(data.target_user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate prior ban", e)
        })?;

        let ban = sqlx::query_as::<_, Ban>(
            "INSERT INTO bans (project_id, target_user_id, target_name, issuer_id, issuer_name, \
                               reason, private_reason, duration, duration_seconds, expires_at, active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, TRUE) RETURNING *",
        )
        .bind(data.project_id)
        .bind(data.target_user_id)
        .bind(&data.target_name)
        .bind(data.issuer_id)
        .bind(&data.issuer_name)
        .bind(&data.reason)
        .bind(&data.private_reason)
        .bind(data.duration)
        .bind(data.duration_seconds)
        .bind(data.expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert ban", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit ban issuance", e)
        })?;

        Ok(ban)
    }

    /// Lift a specific ban. The row is kept for the audit trail.
    pub async fn lift(&self, project_id: Uuid, id: Uuid) -> AppResult<Option<Ban>> {
        sqlx::query_as::<_, Ban>(
            "UPDATE bans SET active = FALSE WHERE id = $1 AND project_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lift ban", e))
    }

    /// List bans for a project, newest first.
    pub async fn list(
        &self,
        project_id: Uuid,
        active_only: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Ban>> {
        let filter = if active_only {
            "WHERE project_id = $1 AND active = TRUE"
        } else {
            "WHERE project_id = $1"
        };

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM bans {filter}"))
            .bind(project_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bans", e))?;

        let bans = sqlx::query_as::<_, Ban>(&format!(
            "SELECT * FROM bans {filter} ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(project_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bans", e))?;

        Ok(PageResponse::new(
            bans,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
