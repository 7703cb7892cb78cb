//! Action log entities.

pub mod model;

pub use model::{ActionLog, ActionStatus, CreateActionLog};
