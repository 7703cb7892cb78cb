//! HTTP integration tests, one module per API surface.
//!
//! Tests marked `#[ignore]` need a PostgreSQL instance. Point
//! `WARDEN_TEST_DATABASE_URL` at an empty database and run
//! `cargo test -- --include-ignored` to exercise them.

mod helpers;

mod auth_test;
mod ban_test;
mod health_test;
mod license_test;
mod member_test;
mod moderation_test;
mod project_test;
mod stats_test;
