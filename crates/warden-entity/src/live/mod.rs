//! Ephemeral live-presence entities fed by server heartbeats.

pub mod history;
pub mod player;
pub mod server;

pub use history::{CreateHistoryPoint, PlayerHistoryPoint};
pub use player::{LivePlayer, UpsertLivePlayer};
pub use server::{LiveServer, UpsertLiveServer};
