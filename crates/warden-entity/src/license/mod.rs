//! License entities gating access to the dashboard.

pub mod model;

pub use model::{CreateLicense, License};
