//! Route definitions for the GameWarden HTTP API.
//!
//! Dashboard routes are organized by domain and mounted under `/api`.
//! Relay routes (the endpoints game servers call) live at the root so
//! that the path a server sees is exactly `/relay/...`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(project_routes())
        .merge(member_routes())
        .merge(moderation_routes())
        .merge(ban_routes())
        .merge(stats_routes())
        .merge(log_routes())
        .merge(license_routes())
        .merge(health_routes());

    let relay_routes = Router::new()
        .route("/relay/heartbeat", post(handlers::relay::heartbeat))
        .route("/relay/check-ban", get(handlers::relay::check_ban));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(relay_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: sign-in and session introspection
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/session", post(handlers::auth::create_session))
        .route("/auth/me", get(handlers::auth::me))
}

/// Project CRUD and API key rotation
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::project::list_projects))
        .route("/projects", post(handlers::project::create_project))
        .route("/projects/{id}", get(handlers::project::get_project))
        .route("/projects/{id}", put(handlers::project::update_project))
        .route("/projects/{id}", delete(handlers::project::delete_project))
        .route(
            "/projects/{id}/rotate-key",
            post(handlers::project::rotate_key),
        )
}

/// Team roster management
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/members", get(handlers::member::list_members))
        .route("/projects/{id}/members", post(handlers::member::add_member))
        .route(
            "/projects/{id}/members/{user_id}",
            put(handlers::member::change_role),
        )
        .route(
            "/projects/{id}/members/{user_id}",
            delete(handlers::member::remove_member),
        )
}

/// Moderation command dispatch
fn moderation_routes() -> Router<AppState> {
    Router::new().route(
        "/projects/{id}/commands",
        post(handlers::moderation::execute_command),
    )
}

/// Ban listing and lifting
fn ban_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/bans", get(handlers::ban::list_bans))
        .route("/projects/{id}/bans/{ban_id}", get(handlers::ban::get_ban))
        .route(
            "/projects/{id}/bans/{ban_id}",
            delete(handlers::ban::lift_ban),
        )
}

/// Live telemetry and platform statistics
fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/stats", get(handlers::stats::overview))
        .route(
            "/projects/{id}/servers",
            get(handlers::stats::platform_servers),
        )
        .route("/projects/{id}/live", get(handlers::stats::live_view))
        .route("/projects/{id}/history", get(handlers::stats::history))
}

/// Audit log access
fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/logs", get(handlers::log::project_logs))
        .route("/logs", get(handlers::log::system_logs))
}

/// License administration (global admin only)
fn license_routes() -> Router<AppState> {
    Router::new()
        .route("/licenses", get(handlers::license::list_licenses))
        .route("/licenses", post(handlers::license::grant_license))
        .route(
            "/licenses/{platform_user_id}",
            delete(handlers::license::revoke_license),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors = cors.allow_headers(Any);
    cors = cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    cors
}
