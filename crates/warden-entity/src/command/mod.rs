//! Moderation commands published to game servers.

pub mod payload;

pub use payload::GameCommand;
