//! Append-only log of operator actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Outcome recorded for an action, including ones that failed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "action_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Success,
    Error,
}

/// One recorded action. `project_id` is `None` for account-level
/// actions such as sign-in or license grants.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActionLog {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub actor_id: Uuid,
    pub actor_name: String,
    /// Machine-readable action name, e.g. `moderation.ban`.
    pub action: String,
    /// Structured detail blob; shape varies per action.
    pub details: Value,
    pub status: ActionStatus,
    pub ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for appending a log entry.
#[derive(Debug, Clone)]
pub struct CreateActionLog {
    pub project_id: Option<Uuid>,
    pub actor_id: Uuid,
    pub actor_name: String,
    pub action: String,
    pub details: Value,
    pub status: ActionStatus,
    pub ip: Option<String>,
}

impl CreateActionLog {
    /// A successful project-scoped entry.
    pub fn success(
        project_id: Uuid,
        actor_id: Uuid,
        actor_name: impl Into<String>,
        action: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            project_id: Some(project_id),
            actor_id,
            actor_name: actor_name.into(),
            action: action.into(),
            details,
            status: ActionStatus::Success,
            ip: None,
        }
    }

    /// A failed project-scoped entry.
    pub fn error(
        project_id: Uuid,
        actor_id: Uuid,
        actor_name: impl Into<String>,
        action: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            project_id: Some(project_id),
            actor_id,
            actor_name: actor_name.into(),
            action: action.into(),
            details,
            status: ActionStatus::Error,
            ip: None,
        }
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip = ip;
        self
    }
}
