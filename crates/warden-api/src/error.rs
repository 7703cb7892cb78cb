//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl for `AppError` lives in `warden-core` next to
//! the type itself (the orphan rule forbids implementing axum's trait for
//! a foreign type here). This module re-exports the response body type.

pub use warden_core::error::ApiErrorResponse;
