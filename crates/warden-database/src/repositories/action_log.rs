//! Action log repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_core::types::pagination::{PageRequest, PageResponse};
use warden_entity::log::{ActionLog, CreateActionLog};

/// Repository for the append-only action log.
#[derive(Debug, Clone)]
pub struct ActionLogRepository {
    pool: PgPool,
}

impl ActionLogRepository {
    /// Create a new action log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one entry. Rows are never updated or deleted.
    pub async fn append(&self, data: &CreateActionLog) -> AppResult<ActionLog> {
        sqlx::query_as::<_, ActionLog>(
            "INSERT INTO action_logs (project_id, actor_id, actor_name, action, details, status, ip) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.project_id)
        .bind(data.actor_id)
        .bind(&data.actor_name)
        .bind(&data.action)
        .bind(&data.details)
        .bind(data.status)
        .bind(&data.ip)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append action log", e))
    }

    /// List a project's log, newest first.
    pub async fn list_for_project(
        &self,
        project_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActionLog>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM action_logs WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count action logs", e)
                })?;

        let entries = sqlx::query_as::<_, ActionLog>(
            "SELECT * FROM action_logs WHERE project_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(project_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list action logs", e))?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List entries across all projects, newest first, including
    /// system-wide rows with no project. Global-admin view only.
    pub async fn list_all(&self, page: &PageRequest) -> AppResult<PageResponse<ActionLog>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM action_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count action logs", e)
            })?;

        let entries = sqlx::query_as::<_, ActionLog>(
            "SELECT * FROM action_logs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list action logs", e))?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a single actor's entries within a project, newest first.
    pub async fn list_for_actor(
        &self,
        project_id: Uuid,
        actor_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActionLog>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM action_logs WHERE project_id = $1 AND actor_id = $2",
        )
        .bind(project_id)
        .bind(actor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count actor logs", e)
        })?;

        let entries = sqlx::query_as::<_, ActionLog>(
            "SELECT * FROM action_logs WHERE project_id = $1 AND actor_id = $2 \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(project_id)
        .bind(actor_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list actor logs", e))?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
