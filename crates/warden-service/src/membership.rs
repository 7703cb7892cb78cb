//! Project membership and role management.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use warden_auth::rbac::ProjectPermission;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_database::repositories::member::MemberRepository;
use warden_database::repositories::user::UserRepository;
use warden_entity::log::{ActionStatus, CreateActionLog};
use warden_entity::member::{MemberDetails, MemberRole, ProjectMember};

use crate::access::ProjectAccess;
use crate::audit::ActionRecorder;
use crate::context::RequestContext;

/// Membership roster and role mutations for one project.
///
/// Mutations require `ManageRoles`, which only the owner (and global
/// admins) hold. Callers can never change or remove their own
/// membership here, and the owner's row is immutable.
#[derive(Debug, Clone)]
pub struct MembershipService {
    access: Arc<ProjectAccess>,
    members: Arc<MemberRepository>,
    users: Arc<UserRepository>,
    recorder: Arc<ActionRecorder>,
}

impl MembershipService {
    /// Creates a new membership service.
    pub fn new(
        access: Arc<ProjectAccess>,
        members: Arc<MemberRepository>,
        users: Arc<UserRepository>,
        recorder: Arc<ActionRecorder>,
    ) -> Self {
        Self {
            access,
            members,
            users,
            recorder,
        }
    }

    /// List the member roster with user profiles, owner first.
    /// Any member of the project may read the roster.
    pub async fn list(&self, ctx: &RequestContext, project_id: Uuid) -> AppResult<Vec<MemberDetails>> {
        self.access.project_role(ctx, project_id).await?;
        self.members.list_details(project_id).await
    }

    /// Add a member by their platform account id.
    ///
    /// The target must have signed in at least once so a user row
    /// exists to attach the membership to.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        platform_user_id: i64,
        role: MemberRole,
    ) -> AppResult<ProjectMember> {
        let (project, _role) = self
            .access
            .require(ctx, project_id, ProjectPermission::ManageRoles)
            .await?;

        if !role.is_assignable() {
            return Err(AppError::validation("The owner role cannot be assigned"));
        }

        let user = self
            .users
            .find_by_platform_id(platform_user_id)
            .await?
            .ok_or_else(|| AppError::not_found("That user has not signed in yet"))?;

        let member = self.members.add(project.id, user.id, role).await?;

        self.recorder
            .record(CreateActionLog {
                project_id: Some(project.id),
                actor_id: ctx.user_id,
                actor_name: ctx.display_name.clone(),
                action: "member.add".into(),
                details: json!({
                    "targetUserId": user.id,
                    "targetPlatformUserId": platform_user_id,
                    "targetUsername": user.username,
                    "role": role.to_string(),
                }),
                status: ActionStatus::Success,
                ip: ctx.ip.clone(),
            })
            .await;

        info!(
            project_id = %project.id,
            target_user_id = %user.id,
            role = %role,
            actor_id = %ctx.user_id,
            "Member added"
        );

        Ok(member)
    }

    /// Change a member's role.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        target_user_id: Uuid,
        role: MemberRole,
    ) -> AppResult<ProjectMember> {
        let (project, _role) = self
            .access
            .require(ctx, project_id, ProjectPermission::ManageRoles)
            .await?;

        if target_user_id == ctx.user_id {
            return Err(AppError::forbidden("Cannot change your own role"));
        }
        if !role.is_assignable() {
            return Err(AppError::validation("The owner role cannot be assigned"));
        }

        let current = self
            .members
            .find(project.id, target_user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User is not a member of this project"))?;
        if current.role == MemberRole::Owner {
            return Err(AppError::forbidden("The project owner's role cannot be changed"));
        }

        let updated = self
            .members
            .update_role(project.id, target_user_id, role)
            .await?
            .ok_or_else(|| AppError::not_found("User is not a member of this project"))?;

        self.recorder
            .record(CreateActionLog {
                project_id: Some(project.id),
                actor_id: ctx.user_id,
                actor_name: ctx.display_name.clone(),
                action: "member.change_role".into(),
                details: json!({
                    "targetUserId": target_user_id,
                    "previousRole": current.role.to_string(),
                    "role": role.to_string(),
                }),
                status: ActionStatus::Success,
                ip: ctx.ip.clone(),
            })
            .await;

        info!(
            project_id = %project.id,
            target_user_id = %target_user_id,
            role = %role,
            actor_id = %ctx.user_id,
            "Member role changed"
        );

        Ok(updated)
    }

    /// Remove a member from the project.
    pub async fn remove(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        target_user_id: Uuid,
    ) -> AppResult<()> {
        let (project, _role) = self
            .access
            .require(ctx, project_id, ProjectPermission::ManageRoles)
            .await?;

        if target_user_id == ctx.user_id {
            return Err(AppError::forbidden("Cannot remove yourself from a project"));
        }

        let current = self
            .members
            .find(project.id, target_user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User is not a member of this project"))?;
        if current.role == MemberRole::Owner {
            return Err(AppError::forbidden("The project owner cannot be removed"));
        }

        self.members.remove(project.id, target_user_id).await?;

        self.recorder
            .record(CreateActionLog {
                project_id: Some(project.id),
                actor_id: ctx.user_id,
                actor_name: ctx.display_name.clone(),
                action: "member.remove".into(),
                details: json!({
                    "targetUserId": target_user_id,
                    "previousRole": current.role.to_string(),
                }),
                status: ActionStatus::Success,
                ip: ctx.ip.clone(),
            })
            .await;

        info!(
            project_id = %project.id,
            target_user_id = %target_user_id,
            actor_id = %ctx.user_id,
            "Member removed"
        );

        Ok(())
    }
}
