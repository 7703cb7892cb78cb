//! Wire payloads for the pub/sub command topic.
//!
//! Every running game server subscribes to one topic per universe and
//! switches on the `action` tag, so the JSON layout here is part of the
//! contract with the in-game relay script.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_core::{AppError, AppResult};

/// Longest announcement body the in-game chat overlay renders.
pub const MAX_ANNOUNCE_LENGTH: usize = 500;

/// A command addressed to game servers, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum GameCommand {
    /// Remove a player from their current server.
    #[serde(rename_all = "camelCase")]
    Kick {
        target_user_id: i64,
        reason: String,
        issuer_name: String,
        issued_at: DateTime<Utc>,
    },
    /// Remove a player and keep them out until the ban expires.
    #[serde(rename_all = "camelCase")]
    Ban {
        target_user_id: i64,
        reason: String,
        /// Remaining seconds; `None` for permanent bans.
        duration_seconds: Option<i64>,
        /// Absolute expiry; `None` for permanent bans.
        expires_at: Option<DateTime<Utc>>,
        issuer_name: String,
        issued_at: DateTime<Utc>,
    },
    /// Show a warning dialog to one player.
    #[serde(rename_all = "camelCase")]
    Warn {
        target_user_id: i64,
        reason: String,
        issuer_name: String,
        issued_at: DateTime<Utc>,
    },
    /// Broadcast a message to every player in the universe.
    #[serde(rename_all = "camelCase")]
    Announce {
        message: String,
        issuer_name: String,
        issued_at: DateTime<Utc>,
    },
}

impl GameCommand {
    /// Wire value of the `action` tag.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Kick { .. } => "kick",
            Self::Ban { .. } => "ban",
            Self::Warn { .. } => "warn",
            Self::Announce { .. } => "announce",
        }
    }

    /// Platform user id the command targets; `None` for broadcasts.
    pub fn target_user_id(&self) -> Option<i64> {
        match self {
            Self::Kick { target_user_id, .. }
            | Self::Ban { target_user_id, .. }
            | Self::Warn { target_user_id, .. } => Some(*target_user_id),
            Self::Announce { .. } => None,
        }
    }

    /// Validate invariants the dashboard must enforce before publish.
    pub fn validate(&self) -> AppResult<()> {
        match self {
            Self::Announce { message, .. } => {
                if message.trim().is_empty() {
                    return Err(AppError::validation("Announcement message must not be empty"));
                }
                if message.chars().count() > MAX_ANNOUNCE_LENGTH {
                    return Err(AppError::validation(format!(
                        "Announcement message exceeds {MAX_ANNOUNCE_LENGTH} characters"
                    )));
                }
                Ok(())
            }
            Self::Kick { reason, .. } | Self::Ban { reason, .. } | Self::Warn { reason, .. } => {
                if reason.trim().is_empty() {
                    return Err(AppError::validation("Reason must not be empty"));
                }
                Ok(())
            }
        }
    }
}
