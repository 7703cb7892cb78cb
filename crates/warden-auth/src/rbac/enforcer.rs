//! RBAC enforcement logic — checks whether a role has a required project permission.

use warden_core::error::AppError;
use warden_entity::member::MemberRole;

use super::policies::{ProjectPermission, RolePolicies};

/// Enforces role-based access control for project-level operations.
#[derive(Debug, Clone)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RolePolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the fixed policy set.
    pub fn new() -> Self {
        Self {
            policies: RolePolicies::new(),
        }
    }

    /// Checks whether the given role has the required permission.
    ///
    /// Returns `Ok(())` if allowed, or `Err(AppError::forbidden)` if denied.
    pub fn require_permission(
        &self,
        role: &MemberRole,
        permission: &ProjectPermission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the role has the required permission (returns bool).
    pub fn has_permission(&self, role: &MemberRole, permission: &ProjectPermission) -> bool {
        self.policies.has_permission(role, permission)
    }

    /// Returns whether the role is the project owner.
    pub fn is_owner(&self, role: &MemberRole) -> bool {
        matches!(role, MemberRole::Owner)
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RolePolicies {
        &self.policies
    }
}

impl Default for RbacEnforcer {
    fn default() -> Self {
        Self::new()
    }
}
