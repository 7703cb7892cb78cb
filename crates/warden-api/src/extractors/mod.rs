//! Custom Axum extractors.

pub mod auth;
pub mod pagination;
pub mod relay_key;

pub use auth::AuthUser;
pub use pagination::PaginationParams;
pub use relay_key::RelayKey;
