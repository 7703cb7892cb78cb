//! Repository implementations for all GameWarden entities.

pub mod action_log;
pub mod ban;
pub mod license;
pub mod member;
pub mod project;
pub mod telemetry;
pub mod user;

pub use action_log::ActionLogRepository;
pub use ban::BanRepository;
pub use license::LicenseRepository;
pub use member::MemberRepository;
pub use project::ProjectRepository;
pub use telemetry::TelemetryRepository;
pub use user::UserRepository;
