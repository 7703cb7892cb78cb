//! Dashboard user accounts.

pub mod model;

pub use model::{UpsertUser, User};
