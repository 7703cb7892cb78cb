//! License gate and license administration.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use warden_core::config::AuthConfig;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_database::repositories::LicenseRepository;
use warden_entity::license::{CreateLicense, License};
use warden_entity::log::CreateActionLog;

use crate::audit::ActionRecorder;
use crate::context::RequestContext;

/// Controls who may sign in to the dashboard at all.
///
/// Licenses are global and independent of project membership: holding
/// one lets an identity authenticate, nothing more.
#[derive(Debug, Clone)]
pub struct LicenseService {
    licenses: Arc<LicenseRepository>,
    recorder: Arc<ActionRecorder>,
    /// Platform id of the always-licensed global admin; 0 disables it.
    global_admin_platform_id: i64,
    /// Grantor name recorded on the admin's auto-granted license.
    system_grantor_name: String,
}

impl LicenseService {
    /// Creates a new license service.
    pub fn new(
        licenses: Arc<LicenseRepository>,
        recorder: Arc<ActionRecorder>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            licenses,
            recorder,
            global_admin_platform_id: config.global_admin_platform_id,
            system_grantor_name: config.system_grantor_name.clone(),
        }
    }

    /// Whether this platform identity is the configured global admin.
    pub fn is_global_admin(&self, platform_user_id: i64) -> bool {
        self.global_admin_platform_id != 0 && platform_user_id == self.global_admin_platform_id
    }

    /// Gate a sign-in attempt on an active license.
    ///
    /// The global admin is implicitly licensed and receives a license
    /// row on first sign-in so the grant shows up in listings.
    pub async fn ensure_licensed(&self, platform_user_id: i64, display_name: &str) -> AppResult<()> {
        if self.is_global_admin(platform_user_id) {
            if !self.licenses.is_licensed(platform_user_id).await? {
                self.licenses
                    .grant(&CreateLicense {
                        platform_user_id,
                        display_name: display_name.to_string(),
                        granted_by_id: None,
                        granted_by_name: self.system_grantor_name.clone(),
                    })
                    .await?;
                info!(platform_user_id, "Auto-granted license to global admin");
            }
            return Ok(());
        }

        if self.licenses.is_licensed(platform_user_id).await? {
            Ok(())
        } else {
            Err(AppError::forbidden("No active license for this account"))
        }
    }

    /// Grant a license. Global admin only.
    pub async fn grant(
        &self,
        ctx: &RequestContext,
        platform_user_id: i64,
        display_name: String,
    ) -> AppResult<License> {
        self.require_global_admin(ctx)?;

        let license = self
            .licenses
            .grant(&CreateLicense {
                platform_user_id,
                display_name: display_name.clone(),
                granted_by_id: Some(ctx.user_id),
                granted_by_name: ctx.display_name.clone(),
            })
            .await?;

        self.recorder
            .record(
                CreateActionLog {
                    project_id: None,
                    actor_id: ctx.user_id,
                    actor_name: ctx.display_name.clone(),
                    action: "license.grant".into(),
                    details: json!({ "platformUserId": platform_user_id, "displayName": display_name }),
                    status: warden_entity::log::ActionStatus::Success,
                    ip: ctx.ip.clone(),
                }
            )
            .await;

        info!(admin_id = %ctx.user_id, platform_user_id, "License granted");
        Ok(license)
    }

    /// Revoke a license. Global admin only.
    pub async fn revoke(&self, ctx: &RequestContext, platform_user_id: i64) -> AppResult<License> {
        self.require_global_admin(ctx)?;

        let license = self
            .licenses
            .revoke(platform_user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No license found for this account"))?;

        self.recorder
            .record(CreateActionLog {
                project_id: None,
                actor_id: ctx.user_id,
                actor_name: ctx.display_name.clone(),
                action: "license.revoke".into(),
                details: json!({ "platformUserId": platform_user_id }),
                status: warden_entity::log::ActionStatus::Success,
                ip: ctx.ip.clone(),
            })
            .await;

        info!(admin_id = %ctx.user_id, platform_user_id, "License revoked");
        Ok(license)
    }

    /// List every license. Global admin only.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<License>> {
        self.require_global_admin(ctx)?;
        self.licenses.list().await
    }

    fn require_global_admin(&self, ctx: &RequestContext) -> AppResult<()> {
        if ctx.is_global_admin {
            Ok(())
        } else {
            Err(AppError::forbidden("Global admin access required"))
        }
    }
}
