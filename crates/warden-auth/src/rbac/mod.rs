//! Role-based access control for project operations.

pub mod enforcer;
pub mod policies;

pub use enforcer::RbacEnforcer;
pub use policies::{ProjectPermission, RolePolicies};
