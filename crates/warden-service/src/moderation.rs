//! Moderation command dispatch.
//!
//! The single path through which every in-game command travels:
//! permission check, validation, optional ban bookkeeping, pub/sub
//! publish, and exactly one action-log entry per attempt.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use warden_auth::rbac::ProjectPermission;
use warden_core::config::PlatformConfig;
use warden_core::result::AppResult;
use warden_database::repositories::ban::{BanRepository, NewBanRow};
use warden_entity::ban::{Ban, BanDuration};
use warden_entity::command::GameCommand;
use warden_entity::log::{ActionStatus, CreateActionLog};
use warden_platform::{EnforcementRequest, PlatformGateway};

use crate::access::ProjectAccess;
use crate::audit::ActionRecorder;
use crate::context::RequestContext;

/// An operator's moderation request, decoded by its `action` tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ModerationRequest {
    #[serde(rename_all = "camelCase")]
    Kick { target_user_id: i64, reason: String },
    #[serde(rename_all = "camelCase")]
    Ban {
        target_user_id: i64,
        /// Display name snapshot shown in the ban list.
        target_name: String,
        reason: String,
        #[serde(default)]
        private_reason: Option<String>,
        duration: BanDuration,
        /// Required when `duration` is `custom`.
        #[serde(default)]
        custom_expiry: Option<DateTime<Utc>>,
    },
    #[serde(rename_all = "camelCase")]
    Warn { target_user_id: i64, reason: String },
    #[serde(rename_all = "camelCase")]
    Announce { message: String },
}

impl ModerationRequest {
    /// The permission gating this command type.
    pub fn required_permission(&self) -> ProjectPermission {
        match self {
            Self::Kick { .. } => ProjectPermission::ExecuteKick,
            Self::Ban { .. } => ProjectPermission::ExecuteBan,
            Self::Warn { .. } => ProjectPermission::ExecuteWarn,
            Self::Announce { .. } => ProjectPermission::ExecuteAnnounce,
        }
    }

    /// Action-log name for this command type.
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::Kick { .. } => "moderation.kick",
            Self::Ban { .. } => "moderation.ban",
            Self::Warn { .. } => "moderation.warn",
            Self::Announce { .. } => "moderation.announce",
        }
    }
}

/// What the operator gets back after a dispatched command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutcome {
    pub action: String,
    /// The ban record, for ban commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban: Option<Ban>,
}

/// Dispatches moderation commands to live game servers.
#[derive(Debug, Clone)]
pub struct ModerationService {
    access: Arc<ProjectAccess>,
    bans: Arc<BanRepository>,
    gateway: Arc<dyn PlatformGateway>,
    recorder: Arc<ActionRecorder>,
    /// Pub/sub topic every game server subscribes to.
    command_topic: String,
}

impl ModerationService {
    /// Creates a new moderation service.
    pub fn new(
        access: Arc<ProjectAccess>,
        bans: Arc<BanRepository>,
        gateway: Arc<dyn PlatformGateway>,
        recorder: Arc<ActionRecorder>,
        config: &PlatformConfig,
    ) -> Self {
        Self {
            access,
            bans,
            gateway,
            recorder,
            command_topic: config.command_topic.clone(),
        }
    }

    /// Execute one moderation command.
    ///
    /// Permission and validation failures abort before any side
    /// effect. After that point the audit entry is written no matter
    /// how the publish went; a failed publish still surfaces as an
    /// upstream error so the operator knows the command may not have
    /// reached the servers.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        request: ModerationRequest,
    ) -> AppResult<CommandOutcome> {
        let (project, _role) = self
            .access
            .require(ctx, project_id, request.required_permission())
            .await?;

        let now = Utc::now();
        let command = build_command(&request, &ctx.display_name, now)?;
        command.validate()?;

        // Ban commands also mutate local state, before the publish:
        // the local record is authoritative for check-ban lookups.
        let ban = if let ModerationRequest::Ban {
            target_user_id,
            target_name,
            reason,
            private_reason,
            duration,
            custom_expiry,
        } = &request
        {
            let resolved = duration.resolve(now, *custom_expiry)?;
            let ban = self
                .bans
                .issue(&NewBanRow {
                    project_id: project.id,
                    target_user_id: *target_user_id,
                    target_name: target_name.clone(),
                    issuer_id: ctx.user_id,
                    issuer_name: ctx.display_name.clone(),
                    reason: reason.clone(),
                    private_reason: private_reason.clone(),
                    duration: *duration,
                    duration_seconds: resolved.duration_seconds,
                    expires_at: resolved.expires_at,
                })
                .await?;

            // Best-effort platform enforcement; the local ban stands
            // either way.
            if let Err(e) = self
                .gateway
                .ban_user(
                    &EnforcementRequest {
                        universe_id: project.universe_id,
                        user_id: *target_user_id,
                        reason: reason.clone(),
                        private_reason: private_reason.clone(),
                        duration_seconds: resolved.duration_seconds,
                    },
                    &project.api_key,
                )
                .await
            {
                warn!(
                    project_id = %project.id,
                    target_user_id,
                    error = %e,
                    "Platform enforcement ban failed; local ban kept"
                );
            }

            Some(ban)
        } else {
            None
        };

        let payload = serde_json::to_value(&command)?;
        let publish_result = self
            .gateway
            .publish_message(project.universe_id, &self.command_topic, &payload, &project.api_key)
            .await;

        let mut details = json!({
            "command": payload,
            "projectName": project.name,
        });
        if let Some(ref ban) = ban {
            details["banId"] = json!(ban.id);
        }
        let status = match &publish_result {
            Ok(()) => ActionStatus::Success,
            Err(e) => {
                details["error"] = json!(e.to_string());
                ActionStatus::Error
            }
        };
        self.recorder
            .record(
                CreateActionLog {
                    project_id: Some(project.id),
                    actor_id: ctx.user_id,
                    actor_name: ctx.display_name.clone(),
                    action: request.action_name().into(),
                    details,
                    status,
                    ip: ctx.ip.clone(),
                },
            )
            .await;

        publish_result?;

        info!(
            project_id = %project.id,
            action = request.action_name(),
            actor_id = %ctx.user_id,
            "Moderation command dispatched"
        );

        Ok(CommandOutcome {
            action: command.action().to_string(),
            ban,
        })
    }
}

/// Build the wire command for a request, resolving ban durations.
fn build_command(
    request: &ModerationRequest,
    issuer_name: &str,
    now: DateTime<Utc>,
) -> AppResult<GameCommand> {
    let command = match request {
        ModerationRequest::Kick {
            target_user_id,
            reason,
        } => GameCommand::Kick {
            target_user_id: *target_user_id,
            reason: reason.clone(),
            issuer_name: issuer_name.to_string(),
            issued_at: now,
        },
        ModerationRequest::Ban {
            target_user_id,
            reason,
            duration,
            custom_expiry,
            ..
        } => {
            let resolved = duration.resolve(now, *custom_expiry)?;
            GameCommand::Ban {
                target_user_id: *target_user_id,
                reason: reason.clone(),
                duration_seconds: resolved.duration_seconds,
                expires_at: resolved.expires_at,
                issuer_name: issuer_name.to_string(),
                issued_at: now,
            }
        }
        ModerationRequest::Warn {
            target_user_id,
            reason,
        } => GameCommand::Warn {
            target_user_id: *target_user_id,
            reason: reason.clone(),
            issuer_name: issuer_name.to_string(),
            issued_at: now,
        },
        ModerationRequest::Announce { message } => GameCommand::Announce {
            message: message.clone(),
            issuer_name: issuer_name.to_string(),
            issued_at: now,
        },
    };
    Ok(command)
}
