//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use warden_auth::rbac::RbacEnforcer;
use warden_auth::token::decoder::TokenDecoder;
use warden_core::config::AppConfig;
use warden_database::DatabasePool;
use warden_database::repositories::project::ProjectRepository;

use warden_service::auth::AuthService;
use warden_service::ban::BanService;
use warden_service::license::LicenseService;
use warden_service::log::LogService;
use warden_service::membership::MembershipService;
use warden_service::moderation::ModerationService;
use warden_service::project::ProjectService;
use warden_service::stats::StatsService;
use warden_service::telemetry::TelemetryService;

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool wrapper (health checks, direct queries)
    pub db: DatabasePool,
    /// Fixed-window limiter for the expensive read endpoints
    pub rate_limiter: RateLimiter,

    // ── Auth ─────────────────────────────────────────────────
    /// Session token decoder and validator
    pub token_decoder: Arc<TokenDecoder>,
    /// Role-based access control enforcer
    pub rbac_enforcer: Arc<RbacEnforcer>,

    // ── Repositories used directly by the API layer ──────────
    /// Project repository; the relay extractor resolves API keys here
    pub project_repo: Arc<ProjectRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Session issuance and current-user lookup
    pub auth_service: Arc<AuthService>,
    /// Project lifecycle
    pub project_service: Arc<ProjectService>,
    /// Membership and roles
    pub membership_service: Arc<MembershipService>,
    /// Moderation command dispatch
    pub moderation_service: Arc<ModerationService>,
    /// Ban list, lifts, and the relay ban check
    pub ban_service: Arc<BanService>,
    /// Heartbeat ingestion and presence views
    pub telemetry_service: Arc<TelemetryService>,
    /// Aggregate stats views
    pub stats_service: Arc<StatsService>,
    /// Action log views
    pub log_service: Arc<LogService>,
    /// License administration
    pub license_service: Arc<LicenseService>,
}
