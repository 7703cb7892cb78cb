//! Mock implementation of the platform gateway for development and testing.
//!
//! Records every call in memory and lets tests flip individual
//! surfaces into failure mode without a network.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use warden_core::error::AppError;
use warden_core::result::AppResult;

use crate::gateway::{
    EnforcementRequest, PlatformGateway, PlatformServer, PlatformStats, PlatformVotes,
};

/// A recorded publish call: (universe_id, topic, message).
pub type PublishedMessage = (i64, String, Value);

/// Mock platform gateway that records calls in-memory.
#[derive(Debug, Default)]
pub struct MockPlatformGateway {
    /// Recorded enforcement bans.
    bans: Mutex<Vec<EnforcementRequest>>,
    /// Recorded unbans: (universe_id, user_id).
    unbans: Mutex<Vec<(i64, i64)>>,
    /// Recorded topic publishes.
    published: Mutex<Vec<PublishedMessage>>,
    /// When set, enforcement calls fail.
    fail_enforcement: Mutex<bool>,
    /// When set, publish calls fail.
    fail_publish: Mutex<bool>,
    /// When set, thumbnail lookups fail.
    fail_thumbnails: Mutex<bool>,
    /// Canned server list returned from fetch_servers.
    servers: Mutex<Vec<PlatformServer>>,
}

impl MockPlatformGateway {
    /// Create a new mock gateway with every surface succeeding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make enforcement ban/unban calls fail.
    pub fn set_fail_enforcement(&self, fail: bool) {
        *self.fail_enforcement.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Make topic publishes fail.
    pub fn set_fail_publish(&self, fail: bool) {
        *self.fail_publish.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Make thumbnail lookups fail.
    pub fn set_fail_thumbnails(&self, fail: bool) {
        *self.fail_thumbnails.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Set the canned server list.
    pub fn set_servers(&self, servers: Vec<PlatformServer>) {
        *self.servers.lock().unwrap_or_else(|e| e.into_inner()) = servers;
    }

    /// Enforcement bans recorded so far.
    pub fn recorded_bans(&self) -> Vec<EnforcementRequest> {
        self.bans.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Unbans recorded so far.
    pub fn recorded_unbans(&self) -> Vec<(i64, i64)> {
        self.unbans.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Topic publishes recorded so far.
    pub fn recorded_publishes(&self) -> Vec<PublishedMessage> {
        self.published.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl PlatformGateway for MockPlatformGateway {
    fn gateway_type(&self) -> &str {
        "mock"
    }

    async fn ban_user(&self, request: &EnforcementRequest, _api_key: &str) -> AppResult<()> {
        if *self.fail_enforcement.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(AppError::upstream("mock enforcement failure"));
        }
        info!(user_id = request.user_id, "[MockPlatform] ban recorded");
        self.bans
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());
        Ok(())
    }

    async fn unban_user(&self, universe_id: i64, user_id: i64, _api_key: &str) -> AppResult<()> {
        if *self.fail_enforcement.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(AppError::upstream("mock enforcement failure"));
        }
        info!(user_id, "[MockPlatform] unban recorded");
        self.unbans
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((universe_id, user_id));
        Ok(())
    }

    async fn publish_message(
        &self,
        universe_id: i64,
        topic: &str,
        message: &Value,
        _api_key: &str,
    ) -> AppResult<()> {
        if *self.fail_publish.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(AppError::upstream("mock publish failure"));
        }
        info!(topic, "[MockPlatform] publish recorded");
        self.published
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((universe_id, topic.to_string(), message.clone()));
        Ok(())
    }

    async fn fetch_servers(&self, _place_id: i64, _api_key: &str) -> AppResult<Vec<PlatformServer>> {
        Ok(self.servers.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn fetch_stats(&self, _universe_id: i64, _api_key: &str) -> AppResult<PlatformStats> {
        Ok(PlatformStats::default())
    }

    async fn fetch_votes(&self, _universe_id: i64, _api_key: &str) -> AppResult<PlatformVotes> {
        Ok(PlatformVotes::default())
    }

    async fn avatar_url(&self, user_id: i64) -> AppResult<Option<String>> {
        if *self.fail_thumbnails.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(AppError::upstream("mock thumbnail failure"));
        }
        Ok(Some(format!(
            "https://thumbnails.platform.example/avatar/{user_id}.png"
        )))
    }
}
