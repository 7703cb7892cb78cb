//! Project lifecycle management.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use warden_auth::apikey;
use warden_auth::rbac::ProjectPermission;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_database::repositories::project::ProjectRepository;
use warden_entity::log::{ActionStatus, CreateActionLog};
use warden_entity::member::MemberRole;
use warden_entity::project::{CreateProject, Project, UpdateProject};

use crate::access::ProjectAccess;
use crate::audit::ActionRecorder;
use crate::context::RequestContext;

const MAX_NAME_LENGTH: usize = 100;

/// Creation, settings, API key rotation, and deletion of projects.
#[derive(Debug, Clone)]
pub struct ProjectService {
    access: Arc<ProjectAccess>,
    projects: Arc<ProjectRepository>,
    recorder: Arc<ActionRecorder>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        access: Arc<ProjectAccess>,
        projects: Arc<ProjectRepository>,
        recorder: Arc<ActionRecorder>,
    ) -> Self {
        Self {
            access,
            projects,
            recorder,
        }
    }

    /// Create a project. The caller becomes its owner.
    pub async fn create(&self, ctx: &RequestContext, data: CreateProject) -> AppResult<Project> {
        validate_settings(&data.name, data.universe_id, data.place_id)?;

        let api_key = apikey::generate_key();
        let project = self.projects.create(&data, ctx.user_id, &api_key).await?;

        self.recorder
            .record(CreateActionLog {
                project_id: Some(project.id),
                actor_id: ctx.user_id,
                actor_name: ctx.display_name.clone(),
                action: "project.create".into(),
                details: json!({
                    "name": project.name,
                    "universeId": project.universe_id,
                    "placeId": project.place_id,
                }),
                status: ActionStatus::Success,
                ip: ctx.ip.clone(),
            })
            .await;

        info!(
            project_id = %project.id,
            owner_id = %ctx.user_id,
            name = %project.name,
            "Project created"
        );

        Ok(project)
    }

    /// List the caller's projects. Global admins see all of them.
    pub async fn list_mine(&self, ctx: &RequestContext) -> AppResult<Vec<Project>> {
        if ctx.is_global_admin {
            self.projects.list_all().await
        } else {
            self.projects.list_for_user(ctx.user_id).await
        }
    }

    /// Load one project with the caller's role, for the overview page.
    pub async fn overview(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> AppResult<(Project, MemberRole)> {
        self.access.project_role(ctx, project_id).await
    }

    /// Update a project's settings.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        data: UpdateProject,
    ) -> AppResult<Project> {
        let (project, _role) = self
            .access
            .require(ctx, project_id, ProjectPermission::ManageConfig)
            .await?;
        validate_settings(&data.name, data.universe_id, data.place_id)?;

        let updated = self
            .projects
            .update(project.id, &data.name, data.universe_id, data.place_id)
            .await?;

        self.recorder
            .record(CreateActionLog {
                project_id: Some(updated.id),
                actor_id: ctx.user_id,
                actor_name: ctx.display_name.clone(),
                action: "project.update".into(),
                details: json!({
                    "name": updated.name,
                    "universeId": updated.universe_id,
                    "placeId": updated.place_id,
                }),
                status: ActionStatus::Success,
                ip: ctx.ip.clone(),
            })
            .await;

        info!(project_id = %updated.id, actor_id = %ctx.user_id, "Project updated");

        Ok(updated)
    }

    /// Replace the project's API key. The response is the only place
    /// the new key is shown in full; game servers must be redeployed
    /// with it before their next heartbeat.
    pub async fn rotate_key(&self, ctx: &RequestContext, project_id: Uuid) -> AppResult<Project> {
        let (project, _role) = self
            .access
            .require(ctx, project_id, ProjectPermission::ManageApiKey)
            .await?;

        let api_key = apikey::generate_key();
        let updated = self.projects.rotate_key(project.id, &api_key).await?;

        self.recorder
            .record(CreateActionLog {
                project_id: Some(updated.id),
                actor_id: ctx.user_id,
                actor_name: ctx.display_name.clone(),
                action: "project.rotate_key".into(),
                details: json!({ "name": updated.name }),
                status: ActionStatus::Success,
                ip: ctx.ip.clone(),
            })
            .await;

        info!(project_id = %updated.id, actor_id = %ctx.user_id, "Project API key rotated");

        Ok(updated)
    }

    /// Delete a project and everything hanging off it. Owner only.
    pub async fn delete(&self, ctx: &RequestContext, project_id: Uuid) -> AppResult<()> {
        let (project, role) = self.access.project_role(ctx, project_id).await?;
        if !self.access.rbac().is_owner(&role) {
            return Err(AppError::forbidden("Only the project owner can delete a project"));
        }

        self.projects.delete(project.id).await?;

        // Project-scoped log rows cascade away with the project, so
        // the deletion itself is recorded system-wide.
        self.recorder
            .record(CreateActionLog {
                project_id: None,
                actor_id: ctx.user_id,
                actor_name: ctx.display_name.clone(),
                action: "project.delete".into(),
                details: json!({
                    "projectId": project.id,
                    "name": project.name,
                }),
                status: ActionStatus::Success,
                ip: ctx.ip.clone(),
            })
            .await;

        info!(project_id = %project.id, actor_id = %ctx.user_id, "Project deleted");

        Ok(())
    }
}

fn validate_settings(name: &str, universe_id: i64, place_id: i64) -> AppResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Project name is required"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation("Project name is too long"));
    }
    if universe_id <= 0 {
        return Err(AppError::validation("A valid universe id is required"));
    }
    if place_id <= 0 {
        return Err(AppError::validation("A valid place id is required"));
    }
    Ok(())
}
