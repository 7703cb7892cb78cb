//! Ban lifecycle reads and lifts.
//!
//! Issuing goes through [`crate::moderation::ModerationService`]; this
//! service covers the dashboard ban list, manual lifts, and the
//! check-ban lookup game servers call on player join.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use warden_auth::rbac::ProjectPermission;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::types::pagination::{PageRequest, PageResponse};
use warden_database::repositories::ban::BanRepository;
use warden_entity::ban::{Ban, BanDuration};
use warden_entity::log::{ActionStatus, CreateActionLog};
use warden_entity::project::Project;
use warden_platform::PlatformGateway;

use crate::access::ProjectAccess;
use crate::audit::ActionRecorder;
use crate::context::RequestContext;

/// Answer for the game-server check-ban lookup.
///
/// `wasUnbanned` lets the game tell a freshly lifted or expired ban
/// apart from a player who was never banned, so it can clear any
/// locally cached ban state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckBanResponse {
    pub banned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<BanDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_unbanned: Option<bool>,
}

/// Ban list and lift operations plus the relay-side ban check.
#[derive(Debug, Clone)]
pub struct BanService {
    access: Arc<ProjectAccess>,
    bans: Arc<BanRepository>,
    gateway: Arc<dyn PlatformGateway>,
    recorder: Arc<ActionRecorder>,
}

impl BanService {
    /// Creates a new ban service.
    pub fn new(
        access: Arc<ProjectAccess>,
        bans: Arc<BanRepository>,
        gateway: Arc<dyn PlatformGateway>,
        recorder: Arc<ActionRecorder>,
    ) -> Self {
        Self {
            access,
            bans,
            gateway,
            recorder,
        }
    }

    /// List bans for a project, newest first.
    pub async fn list_bans(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        active_only: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Ban>> {
        self.access
            .require(ctx, project_id, ProjectPermission::ManageBans)
            .await?;
        self.bans.list(project_id, active_only, page).await
    }

    /// Fetch a single ban record.
    pub async fn get_ban(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        ban_id: Uuid,
    ) -> AppResult<Ban> {
        self.access
            .require(ctx, project_id, ProjectPermission::ManageBans)
            .await?;
        self.bans
            .find_by_id(project_id, ban_id)
            .await?
            .ok_or_else(|| AppError::not_found("Ban not found"))
    }

    /// Lift an active ban.
    ///
    /// The local record is deactivated first; the platform-side unban
    /// is best-effort and a failure there does not undo the lift.
    pub async fn lift_ban(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        ban_id: Uuid,
    ) -> AppResult<Ban> {
        let (project, _role) = self
            .access
            .require(ctx, project_id, ProjectPermission::ManageBans)
            .await?;

        let ban = self
            .bans
            .lift(project_id, ban_id)
            .await?
            .ok_or_else(|| AppError::not_found("No active ban with that id"))?;

        if let Err(e) = self
            .gateway
            .unban_user(project.universe_id, ban.target_user_id, &project.api_key)
            .await
        {
            warn!(
                project_id = %project.id,
                target_user_id = ban.target_user_id,
                error = %e,
                "Platform enforcement unban failed; local lift kept"
            );
        }

        self.recorder
            .record(CreateActionLog {
                project_id: Some(project.id),
                actor_id: ctx.user_id,
                actor_name: ctx.display_name.clone(),
                action: "ban.lift".into(),
                details: json!({
                    "banId": ban.id,
                    "targetUserId": ban.target_user_id,
                    "targetName": ban.target_name,
                }),
                status: ActionStatus::Success,
                ip: ctx.ip.clone(),
            })
            .await;

        info!(
            project_id = %project.id,
            ban_id = %ban.id,
            actor_id = %ctx.user_id,
            "Ban lifted"
        );

        Ok(ban)
    }

    /// Answer a game server's join-time ban check.
    ///
    /// Expired bans are treated as lifted: the row stays `active` in
    /// storage until someone writes to it, but an expired `expires_at`
    /// means not banned here.
    pub async fn check_ban(
        &self,
        project: &Project,
        target_user_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<CheckBanResponse> {
        let latest = self
            .bans
            .find_latest_for_target(project.id, target_user_id)
            .await?;

        let response = match latest {
            Some(ban) if ban.is_enforced(now) => CheckBanResponse {
                banned: true,
                reason: Some(ban.reason),
                duration: Some(ban.duration),
                expires_at: ban.expires_at,
                was_unbanned: None,
            },
            Some(_) => CheckBanResponse {
                banned: false,
                reason: None,
                duration: None,
                expires_at: None,
                was_unbanned: Some(true),
            },
            None => CheckBanResponse {
                banned: false,
                reason: None,
                duration: None,
                expires_at: None,
                was_unbanned: Some(false),
            },
        };
        Ok(response)
    }
}
