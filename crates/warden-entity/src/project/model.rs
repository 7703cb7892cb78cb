//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A managed game deployment: one platform universe/place pair with its
/// own members, API key, bans, and logs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project identifier.
    pub id: Uuid,
    /// Operator-chosen project name.
    pub name: String,
    /// Platform universe identifier.
    pub universe_id: i64,
    /// Platform place identifier.
    pub place_id: i64,
    /// Shared secret authenticating relay traffic and platform calls.
    ///
    /// Sensitive: only the owner ever sees the full value. Responses to
    /// other members carry a redacted form.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Operator account that created the project.
    pub owner_id: Uuid,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Redacted form of the API key shown to non-owners.
    ///
    /// Keeps the fixed prefix so operators can tell which key family a
    /// project uses without exposing the secret.
    pub fn redacted_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(8).collect();
        format!("{prefix}{}", "•".repeat(24))
    }
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    /// Operator-chosen project name.
    pub name: String,
    /// Platform universe identifier.
    pub universe_id: i64,
    /// Platform place identifier.
    pub place_id: i64,
}

/// Data for updating a project's settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub name: String,
    pub universe_id: i64,
    pub place_id: i64,
}
