//! Authentication and authorization for GameWarden.
//!
//! Covers the three trust boundaries of the dashboard: operator
//! session tokens (JWT), per-project role policies (RBAC), and the
//! shared API key presented by game servers.

pub mod apikey;
pub mod rbac;
pub mod token;

pub use rbac::{ProjectPermission, RbacEnforcer, RolePolicies};
pub use token::{Claims, TokenDecoder, TokenEncoder};
