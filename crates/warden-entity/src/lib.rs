//! # warden-entity
//!
//! Domain entity models for GameWarden. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod ban;
pub mod command;
pub mod license;
pub mod live;
pub mod log;
pub mod member;
pub mod project;
pub mod user;
