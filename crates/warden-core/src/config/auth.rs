//! Operator session token and global-admin configuration.

use serde::{Deserialize, Serialize};

/// Session token settings for dashboard operators.
///
/// The OAuth front door that verifies platform identities lives outside
/// this service; we only mint and validate our own session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing session tokens.
    #[serde(default = "default_secret")]
    pub token_secret: String,
    /// Session token lifetime in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,
    /// Platform user id of the global admin identity.
    ///
    /// This identity is implicitly licensed and is auto-granted a
    /// license row on first login. Zero disables the global admin.
    #[serde(default)]
    pub global_admin_platform_id: i64,
    /// Display name recorded for licenses granted by the system itself.
    #[serde(default = "default_system_name")]
    pub system_grantor_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_secret(),
            token_ttl_minutes: default_token_ttl(),
            global_admin_platform_id: 0,
            system_grantor_name: default_system_name(),
        }
    }
}

fn default_secret() -> String {
    // Overridden in any real deployment via WARDEN__AUTH__TOKEN_SECRET.
    "development-only-secret".to_string()
}

fn default_token_ttl() -> i64 {
    12 * 60
}

fn default_system_name() -> String {
    "System".to_string()
}
