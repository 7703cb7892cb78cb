//! Request context carrying the authenticated operator identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Extracted by the API layer from the session token and passed into
/// service methods so that every operation knows *who* is acting.
/// Project roles are intentionally absent: they are per-project and
/// resolved against the membership table at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account's ID.
    pub user_id: Uuid,
    /// Platform user id of the account.
    pub platform_user_id: i64,
    /// Username (convenience field from token claims).
    pub username: String,
    /// Display name used in audit entries and command payloads.
    pub display_name: String,
    /// Whether this account is the configured global admin.
    pub is_global_admin: bool,
    /// IP address of the request origin, best-effort.
    pub ip: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        platform_user_id: i64,
        username: String,
        display_name: String,
        is_global_admin: bool,
        ip: Option<String>,
    ) -> Self {
        Self {
            user_id,
            platform_user_id,
            username,
            display_name,
            is_global_admin,
            ip,
            request_time: Utc::now(),
        }
    }
}
