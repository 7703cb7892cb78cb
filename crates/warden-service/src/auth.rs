//! Sign-in boundary: license gate, account upsert, token issuance.
//!
//! OAuth itself happens upstream; by the time this service runs, the
//! platform identity has already been verified. What remains is the
//! dashboard's own bookkeeping.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use warden_auth::token::{IssuedToken, TokenEncoder};
use warden_core::result::AppResult;
use warden_database::repositories::UserRepository;
use warden_entity::log::{ActionStatus, CreateActionLog};
use warden_entity::user::{UpsertUser, User};

use crate::audit::ActionRecorder;
use crate::license::LicenseService;

/// A verified platform identity handed over by the OAuth boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformIdentity {
    pub platform_user_id: i64,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Handles dashboard sign-in.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<UserRepository>,
    licenses: Arc<LicenseService>,
    encoder: Arc<TokenEncoder>,
    recorder: Arc<ActionRecorder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<UserRepository>,
        licenses: Arc<LicenseService>,
        encoder: Arc<TokenEncoder>,
        recorder: Arc<ActionRecorder>,
    ) -> Self {
        Self {
            users,
            licenses,
            encoder,
            recorder,
        }
    }

    /// Sign a verified identity in: gate on license, upsert the
    /// account, issue a session token.
    pub async fn sign_in(
        &self,
        identity: PlatformIdentity,
        ip: Option<String>,
    ) -> AppResult<(User, IssuedToken)> {
        self.licenses
            .ensure_licensed(identity.platform_user_id, &identity.display_name)
            .await?;

        let is_global_admin = self.licenses.is_global_admin(identity.platform_user_id);

        let user = self
            .users
            .upsert(
                &UpsertUser {
                    platform_user_id: identity.platform_user_id,
                    username: identity.username,
                    display_name: identity.display_name,
                    avatar_url: identity.avatar_url,
                },
                is_global_admin,
            )
            .await?;

        let token = self.encoder.issue(&user)?;

        self.recorder
            .record(CreateActionLog {
                project_id: None,
                actor_id: user.id,
                actor_name: user.display_name.clone(),
                action: "auth.sign_in".into(),
                details: json!({ "platformUserId": user.platform_user_id }),
                status: ActionStatus::Success,
                ip,
            })
            .await;

        info!(
            user_id = %user.id,
            platform_user_id = user.platform_user_id,
            "Operator signed in"
        );

        Ok((user, token))
    }

    /// Load the account behind a session for `/auth/me`.
    pub async fn current_user(&self, user_id: uuid::Uuid) -> AppResult<Option<User>> {
        self.users.find_by_id(user_id).await
    }
}
