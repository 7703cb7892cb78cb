//! Shared project access resolution.
//!
//! Roles are per-project, so unlike the session identity they cannot
//! ride in the token. Every project-scoped service call resolves the
//! caller's membership here first, then checks the required
//! permission against the fixed role table.

use std::sync::Arc;

use uuid::Uuid;

use warden_auth::rbac::{ProjectPermission, RbacEnforcer};
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_database::repositories::{MemberRepository, ProjectRepository};
use warden_entity::member::MemberRole;
use warden_entity::project::Project;

use crate::context::RequestContext;

/// Resolves a caller's project and effective role.
#[derive(Debug, Clone)]
pub struct ProjectAccess {
    projects: Arc<ProjectRepository>,
    members: Arc<MemberRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl ProjectAccess {
    /// Creates a new access resolver.
    pub fn new(
        projects: Arc<ProjectRepository>,
        members: Arc<MemberRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            projects,
            members,
            rbac,
        }
    }

    /// Load the project and the caller's effective role in it.
    ///
    /// The global admin acts with owner rights in every project
    /// without holding a membership row.
    pub async fn project_role(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> AppResult<(Project, MemberRole)> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        if ctx.is_global_admin {
            return Ok((project, MemberRole::Owner));
        }

        let member = self
            .members
            .find(project_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::forbidden("You are not a member of this project"))?;

        Ok((project, member.role))
    }

    /// Resolve the role and require a permission in one step.
    pub async fn require(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        permission: ProjectPermission,
    ) -> AppResult<(Project, MemberRole)> {
        let (project, role) = self.project_role(ctx, project_id).await?;
        self.rbac.require_permission(&role, &permission)?;
        Ok((project, role))
    }

    /// The enforcer, for callers that need extra checks on a resolved role.
    pub fn rbac(&self) -> &RbacEnforcer {
        &self.rbac
    }
}
