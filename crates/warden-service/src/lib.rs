//! # warden-service
//!
//! Business logic for GameWarden. Services compose the repositories,
//! the RBAC enforcer, and the platform gateway; every operator-facing
//! method takes a [`context::RequestContext`] so authorization and
//! auditing always know who is acting.

pub mod access;
pub mod audit;
pub mod auth;
pub mod ban;
pub mod context;
pub mod license;
pub mod log;
pub mod membership;
pub mod moderation;
pub mod project;
pub mod stats;
pub mod telemetry;

pub use context::RequestContext;
