//! License repository implementation.

use sqlx::PgPool;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_entity::license::{CreateLicense, License};

/// Repository for dashboard access licenses.
#[derive(Debug, Clone)]
pub struct LicenseRepository {
    pool: PgPool,
}

impl LicenseRepository {
    /// Create a new license repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the license row for a platform identity.
    pub async fn find_by_platform_id(&self, platform_user_id: i64) -> AppResult<Option<License>> {
        sqlx::query_as::<_, License>("SELECT * FROM licenses WHERE platform_user_id = $1")
            .bind(platform_user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find license", e))
    }

    /// Grant a license, reactivating a previously revoked one.
    pub async fn grant(&self, data: &CreateLicense) -> AppResult<License> {
        sqlx::query_as::<_, License>(
            "INSERT INTO licenses (platform_user_id, display_name, granted_by_id, granted_by_name, active) \
             VALUES ($1, $2, $3, $4, TRUE) \
             ON CONFLICT (platform_user_id) DO UPDATE SET \
                 display_name = EXCLUDED.display_name, \
                 granted_by_id = EXCLUDED.granted_by_id, \
                 granted_by_name = EXCLUDED.granted_by_name, \
                 granted_at = NOW(), \
                 active = TRUE \
             RETURNING *",
        )
        .bind(data.platform_user_id)
        .bind(&data.display_name)
        .bind(data.granted_by_id)
        .bind(&data.granted_by_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to grant license", e))
    }

    /// Revoke a license. The row is kept so the grant history survives.
    pub async fn revoke(&self, platform_user_id: i64) -> AppResult<Option<License>> {
        sqlx::query_as::<_, License>(
            "UPDATE licenses SET active = FALSE WHERE platform_user_id = $1 RETURNING *",
        )
        .bind(platform_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke license", e))
    }

    /// List every license, newest grant first.
    pub async fn list(&self) -> AppResult<Vec<License>> {
        sqlx::query_as::<_, License>("SELECT * FROM licenses ORDER BY granted_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list licenses", e))
    }

    /// Whether the identity currently holds an active license.
    pub async fn is_licensed(&self, platform_user_id: i64) -> AppResult<bool> {
        let active: Option<bool> =
            sqlx::query_scalar("SELECT active FROM licenses WHERE platform_user_id = $1")
                .bind(platform_user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check license", e)
                })?;
        Ok(active.unwrap_or(false))
    }
}
