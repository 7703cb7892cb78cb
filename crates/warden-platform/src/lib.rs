//! Gateway to the external game platform's HTTP APIs.
//!
//! Everything the dashboard needs from the platform goes through the
//! [`PlatformGateway`] trait: ban enforcement, pub/sub message
//! delivery to live servers, read-only stats, and avatar thumbnails.
//! The HTTP implementation talks to the real platform; the mock keeps
//! everything in memory for development and tests.

pub mod gateway;
pub mod http;
pub mod mock;

pub use gateway::{
    EnforcementRequest, PlatformGateway, PlatformServer, PlatformStats, PlatformVotes,
};
pub use http::HttpPlatformGateway;
pub use mock::MockPlatformGateway;
