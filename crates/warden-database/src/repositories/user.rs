//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_entity::user::{UpsertUser, User};

/// Repository for dashboard accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by platform user id.
    pub async fn find_by_platform_id(&self, platform_user_id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE platform_user_id = $1")
            .bind(platform_user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by platform id", e)
            })
    }

    /// Insert the account on first sign-in, refresh it on later ones.
    pub async fn upsert(&self, data: &UpsertUser, is_global_admin: bool) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (platform_user_id, username, display_name, avatar_url, is_global_admin, last_login_at) \
             VALUES ($1, $2, $3, $4, $5, NOW()) \
             ON CONFLICT (platform_user_id) DO UPDATE SET \
                 username = EXCLUDED.username, \
                 display_name = EXCLUDED.display_name, \
                 avatar_url = EXCLUDED.avatar_url, \
                 is_global_admin = EXCLUDED.is_global_admin, \
                 last_login_at = NOW() \
             RETURNING *",
        )
        .bind(data.platform_user_id)
        .bind(&data.username)
        .bind(&data.display_name)
        .bind(&data.avatar_url)
        .bind(is_global_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert user", e))
    }
}
