//! Project membership repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_entity::member::{MemberDetails, MemberRole, ProjectMember};

/// Repository for per-project memberships and roles.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find one membership by (project, user).
    pub async fn find(&self, project_id: Uuid, user_id: Uuid) -> AppResult<Option<ProjectMember>> {
        sqlx::query_as::<_, ProjectMember>(
            "SELECT * FROM project_members WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// List all members of a project, owner first.
    pub async fn list(&self, project_id: Uuid) -> AppResult<Vec<ProjectMember>> {
        sqlx::query_as::<_, ProjectMember>(
            "SELECT * FROM project_members WHERE project_id = $1 \
             ORDER BY (role = 'owner') DESC, joined_at ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }

    /// List members joined with user profiles, owner first.
    pub async fn list_details(&self, project_id: Uuid) -> AppResult<Vec<MemberDetails>> {
        sqlx::query_as::<_, MemberDetails>(
            "SELECT m.id, m.project_id, m.user_id, m.role, m.joined_at, \
                    u.platform_user_id, u.username, u.display_name, u.avatar_url \
             FROM project_members m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.project_id = $1 \
             ORDER BY (m.role = 'owner') DESC, m.joined_at ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list member details", e))
    }

    /// Add a member with the given role.
    pub async fn add(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> AppResult<ProjectMember> {
        sqlx::query_as::<_, ProjectMember>(
            "INSERT INTO project_members (project_id, user_id, role) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::conflict("User is already a member of this project")
            }
            e => AppError::with_source(ErrorKind::Database, "Failed to add member", e),
        })
    }

    /// Change a member's role.
    pub async fn update_role(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> AppResult<Option<ProjectMember>> {
        sqlx::query_as::<_, ProjectMember>(
            "UPDATE project_members SET role = $3 \
             WHERE project_id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))
    }

    /// Remove a member.
    pub async fn remove(&self, project_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove member", e)
                })?;
        Ok(result.rows_affected() > 0)
    }
}
