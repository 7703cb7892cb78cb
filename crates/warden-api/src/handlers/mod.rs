//! HTTP request handlers, grouped by domain.

pub mod auth;
pub mod ban;
pub mod health;
pub mod license;
pub mod log;
pub mod member;
pub mod moderation;
pub mod project;
pub mod relay;
pub mod stats;
