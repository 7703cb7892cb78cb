//! GameWarden Server — Live-Ops Moderation Dashboard Backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use warden_core::config::AppConfig;
use warden_core::error::AppError;
use warden_platform::{HttpPlatformGateway, PlatformGateway};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("WARDEN_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting GameWarden v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = warden_database::DatabasePool::connect(&config.database).await?;
    db.migrate().await?;

    // ── Step 2: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(warden_database::repositories::user::UserRepository::new(
        db.pool().clone(),
    ));
    let project_repo = Arc::new(
        warden_database::repositories::project::ProjectRepository::new(db.pool().clone()),
    );
    let member_repo = Arc::new(
        warden_database::repositories::member::MemberRepository::new(db.pool().clone()),
    );
    let ban_repo = Arc::new(warden_database::repositories::ban::BanRepository::new(
        db.pool().clone(),
    ));
    let log_repo = Arc::new(
        warden_database::repositories::action_log::ActionLogRepository::new(db.pool().clone()),
    );
    let telemetry_repo = Arc::new(
        warden_database::repositories::telemetry::TelemetryRepository::new(db.pool().clone()),
    );
    let license_repo = Arc::new(
        warden_database::repositories::license::LicenseRepository::new(db.pool().clone()),
    );

    // ── Step 3: Initialize auth system ───────────────────────────
    tracing::info!("Initializing authentication system...");
    let token_encoder = Arc::new(warden_auth::token::encoder::TokenEncoder::new(&config.auth));
    let token_decoder = Arc::new(warden_auth::token::decoder::TokenDecoder::new(&config.auth));
    let rbac_enforcer = Arc::new(warden_auth::rbac::RbacEnforcer::new());

    // ── Step 4: Platform gateway ─────────────────────────────────
    tracing::info!("Initializing platform gateway...");
    let gateway: Arc<dyn PlatformGateway> = Arc::new(HttpPlatformGateway::new(&config.platform)?);

    // ── Step 5: Initialize services ──────────────────────────────
    tracing::info!("Initializing services...");
    let access = Arc::new(warden_service::access::ProjectAccess::new(
        Arc::clone(&project_repo),
        Arc::clone(&member_repo),
        Arc::clone(&rbac_enforcer),
    ));
    let recorder = Arc::new(warden_service::audit::ActionRecorder::new(Arc::clone(
        &log_repo,
    )));
    let license_service = Arc::new(warden_service::license::LicenseService::new(
        Arc::clone(&license_repo),
        Arc::clone(&recorder),
        &config.auth,
    ));
    let auth_service = Arc::new(warden_service::auth::AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&license_service),
        Arc::clone(&token_encoder),
        Arc::clone(&recorder),
    ));
    let project_service = Arc::new(warden_service::project::ProjectService::new(
        Arc::clone(&access),
        Arc::clone(&project_repo),
        Arc::clone(&recorder),
    ));
    let membership_service = Arc::new(warden_service::membership::MembershipService::new(
        Arc::clone(&access),
        Arc::clone(&member_repo),
        Arc::clone(&user_repo),
        Arc::clone(&recorder),
    ));
    let moderation_service = Arc::new(warden_service::moderation::ModerationService::new(
        Arc::clone(&access),
        Arc::clone(&ban_repo),
        Arc::clone(&gateway),
        Arc::clone(&recorder),
        &config.platform,
    ));
    let ban_service = Arc::new(warden_service::ban::BanService::new(
        Arc::clone(&access),
        Arc::clone(&ban_repo),
        Arc::clone(&gateway),
        Arc::clone(&recorder),
    ));
    let telemetry_service = Arc::new(warden_service::telemetry::TelemetryService::new(
        Arc::clone(&access),
        Arc::clone(&telemetry_repo),
        Arc::clone(&gateway),
        config.telemetry.clone(),
    ));
    let stats_service = Arc::new(warden_service::stats::StatsService::new(
        Arc::clone(&access),
        Arc::clone(&telemetry_repo),
        Arc::clone(&gateway),
        config.telemetry.clone(),
    ));
    let log_service = Arc::new(warden_service::log::LogService::new(
        Arc::clone(&access),
        Arc::clone(&log_repo),
    ));
    tracing::info!("Services initialized");

    // ── Step 6: Build and start HTTP server ──────────────────────
    let rate_limiter = warden_api::middleware::rate_limit::RateLimiter::new(&config.rate_limit);

    let app_state = warden_api::state::AppState {
        // Configuration
        config: Arc::new(config.clone()),

        // Infrastructure
        db: db.clone(),
        rate_limiter,

        // Auth
        token_decoder: Arc::clone(&token_decoder),
        rbac_enforcer: Arc::clone(&rbac_enforcer),

        // Repositories
        project_repo: Arc::clone(&project_repo),

        // Services
        auth_service,
        project_service,
        membership_service,
        moderation_service,
        ban_service,
        telemetry_service,
        stats_service,
        log_service,
        license_service,
    };

    let app = warden_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("GameWarden server listening on {}", addr);

    // ── Step 7: Graceful shutdown ────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, draining in-flight requests...");
        let _ = shutdown_tx.send(true);
    });

    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {}", e)))?;
        }
        _ = async {
            let _ = shutdown_rx.changed().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!("Grace period elapsed with connections still open, shutting down anyway");
        }
    }

    db.close().await;
    tracing::info!("GameWarden server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
