//! Action log read views.

use std::sync::Arc;

use uuid::Uuid;

use warden_auth::rbac::ProjectPermission;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::types::pagination::{PageRequest, PageResponse};
use warden_database::repositories::ActionLogRepository;
use warden_entity::log::ActionLog;

use crate::access::ProjectAccess;
use crate::context::RequestContext;

/// Paginated log listings with per-role visibility.
///
/// `ViewLogs` holders see the whole project log; roles with only
/// `ViewOwnLogs` are silently narrowed to their own entries rather
/// than rejected, so moderators still get a useful history page.
#[derive(Debug, Clone)]
pub struct LogService {
    access: Arc<ProjectAccess>,
    logs: Arc<ActionLogRepository>,
}

impl LogService {
    /// Creates a new log service.
    pub fn new(access: Arc<ProjectAccess>, logs: Arc<ActionLogRepository>) -> Self {
        Self { access, logs }
    }

    /// List a project's log as far as the caller's role allows.
    pub async fn list_project_logs(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActionLog>> {
        let (project, role) = self.access.project_role(ctx, project_id).await?;

        let rbac = self.access.rbac();
        if rbac.has_permission(&role, &ProjectPermission::ViewLogs) {
            self.logs.list_for_project(project.id, page).await
        } else if rbac.has_permission(&role, &ProjectPermission::ViewOwnLogs) {
            self.logs.list_for_actor(project.id, ctx.user_id, page).await
        } else {
            Err(AppError::forbidden("You cannot view this project's logs"))
        }
    }

    /// List every entry across the system. Global admin only; this is
    /// the only view that includes project-less rows such as sign-ins
    /// and license grants.
    pub async fn list_system_logs(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActionLog>> {
        if !ctx.is_global_admin {
            return Err(AppError::forbidden("Global admin access required"));
        }
        self.logs.list_all(page).await
    }
}
