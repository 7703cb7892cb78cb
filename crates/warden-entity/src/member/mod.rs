//! Project membership domain entities.

pub mod model;
pub mod role;

pub use model::{MemberDetails, ProjectMember};
pub use role::MemberRole;
