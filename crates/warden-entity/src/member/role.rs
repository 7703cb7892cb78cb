//! Per-project member role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user can hold within a single project.
///
/// Exactly one role exists per (project, user) pair. Owner is assigned
/// at project creation and never through membership management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Project creator. Holds every permission, including key rotation
    /// and membership management.
    Owner,
    /// Trusted staff. Full moderation toolkit plus ban management and
    /// log visibility, but no project administration.
    Admin,
    /// Front-line staff. Kick/warn/announce and own-log visibility only.
    Moderator,
}

impl MemberRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
        }
    }

    /// Whether this role may be handed out via membership management.
    ///
    /// Owner is excluded: it exists only through project creation.
    pub fn is_assignable(&self) -> bool {
        !matches!(self, Self::Owner)
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = warden_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            _ => Err(warden_core::AppError::validation(format!(
                "Invalid member role: '{s}'. Expected one of: owner, admin, moderator"
            ))),
        }
    }
}
