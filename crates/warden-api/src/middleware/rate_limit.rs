//! Fixed-window rate limiter for the expensive read endpoints.
//!
//! Handlers that fan out to the platform's APIs (stats, server list)
//! call [`RateLimiter::check`] with the caller id and endpoint name
//! before doing any work. Counters are process-local; running several
//! instances multiplies the effective limit.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use warden_core::config::RateLimitConfig;
use warden_core::error::AppError;
use warden_core::result::AppResult;

/// In-memory fixed-window counter keyed by caller+endpoint.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<String, Window>>>,
    window: Duration,
    max_requests: u32,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

impl RateLimiter {
    /// Creates a new limiter from configuration.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            window: Duration::from_secs(config.window_seconds),
            max_requests: config.max_requests,
        }
    }

    /// Count one request; error once the window's budget is spent.
    pub async fn check(&self, caller: &str, endpoint: &str) -> AppResult<()> {
        self.check_at(format!("{caller}:{endpoint}"), Instant::now())
            .await
    }

    async fn check_at(&self, key: String, now: Instant) -> AppResult<()> {
        let mut windows = self.windows.lock().await;
        let window = windows.entry(key).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(window.started_at) >= self.window {
            window.started_at = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            return Err(AppError::rate_limited("Rate limit exceeded, try again shortly"));
        }
        window.count += 1;
        Ok(())
    }
}
