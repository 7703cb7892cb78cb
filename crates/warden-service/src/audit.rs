//! Action log recording.

use std::sync::Arc;

use tracing::error;

use warden_database::repositories::ActionLogRepository;
use warden_entity::log::CreateActionLog;

/// Appends entries to the action log.
///
/// Recording never fails the operation being recorded: once a command
/// has been dispatched or a ban written, the caller's result must not
/// flip because the log insert hit a database error. Failures are
/// logged and dropped.
#[derive(Debug, Clone)]
pub struct ActionRecorder {
    logs: Arc<ActionLogRepository>,
}

impl ActionRecorder {
    /// Creates a new recorder.
    pub fn new(logs: Arc<ActionLogRepository>) -> Self {
        Self { logs }
    }

    /// Append one entry, swallowing storage failures.
    pub async fn record(&self, entry: CreateActionLog) {
        if let Err(e) = self.logs.append(&entry).await {
            error!(
                action = %entry.action,
                actor_id = %entry.actor_id,
                error = %e,
                "Failed to append action log entry"
            );
        }
    }
}
