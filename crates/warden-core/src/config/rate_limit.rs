//! Fixed-window rate limit configuration.

use serde::{Deserialize, Serialize};

/// Limits applied to the expensive read endpoints (stats, server list)
/// that fan out to the platform's APIs.
///
/// Counters are process-local. Running multiple instances multiplies
/// the effective limit by the instance count; that is a documented
/// property of this limiter, not something the service corrects for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
    /// Requests allowed per caller+endpoint within one window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window(),
            max_requests: default_max_requests(),
        }
    }
}

fn default_window() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    30
}
