//! # warden-api
//!
//! HTTP API layer for GameWarden built on Axum.
//!
//! Two inbound surfaces share one router: the operator dashboard API
//! (JWT sessions, `/api/...`) and the game-server relay (`/relay/...`,
//! authenticated per-project by API key). Handlers stay thin — decode,
//! authenticate, call a service, wrap the response.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
