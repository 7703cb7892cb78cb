//! # warden-core
//!
//! Core crate for GameWarden. Contains configuration schemas, shared
//! types (pagination), and the unified error system.
//!
//! This crate has **no** internal dependencies on other GameWarden crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
