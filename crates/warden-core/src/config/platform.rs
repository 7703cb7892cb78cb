//! External game-platform API configuration.

use serde::{Deserialize, Serialize};

/// Endpoints and timeouts for the third-party platform's HTTP APIs.
///
/// Four surfaces are consumed: ban enforcement, pub/sub messaging,
/// game presence/stats, and avatar thumbnails. All calls share one
/// client-level timeout so a hung upstream cannot stall a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the ban enforcement API.
    #[serde(default = "default_enforcement_url")]
    pub enforcement_base_url: String,
    /// Base URL of the messaging (pub/sub) API.
    #[serde(default = "default_messaging_url")]
    pub messaging_base_url: String,
    /// Base URL of the presence/stats API.
    #[serde(default = "default_games_url")]
    pub games_base_url: String,
    /// Base URL of the thumbnails API.
    #[serde(default = "default_thumbnails_url")]
    pub thumbnails_base_url: String,
    /// Topic live game servers subscribe to for moderation commands.
    #[serde(default = "default_topic")]
    pub command_topic: String,
    /// Timeout applied to every outbound platform call, in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            enforcement_base_url: default_enforcement_url(),
            messaging_base_url: default_messaging_url(),
            games_base_url: default_games_url(),
            thumbnails_base_url: default_thumbnails_url(),
            command_topic: default_topic(),
            request_timeout_seconds: default_timeout(),
        }
    }
}

fn default_enforcement_url() -> String {
    "https://apis.platform.example/cloud/v2".to_string()
}

fn default_messaging_url() -> String {
    "https://apis.platform.example/messaging-service/v1".to_string()
}

fn default_games_url() -> String {
    "https://games.platform.example/v1".to_string()
}

fn default_thumbnails_url() -> String {
    "https://thumbnails.platform.example/v1".to_string()
}

fn default_topic() -> String {
    "WardenCommands".to_string()
}

fn default_timeout() -> u64 {
    10
}
