//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use warden_entity::member::MemberRole;

/// A project-scoped capability derived from the member's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPermission {
    // Monitoring
    /// View live player/server stats.
    ViewStats,

    // In-game moderation commands
    /// Kick a player from their server.
    ExecuteKick,
    /// Ban a player from the game.
    ExecuteBan,
    /// Warn a player in-game.
    ExecuteWarn,
    /// Broadcast an announcement to all servers.
    ExecuteAnnounce,

    // Audit
    /// View every member's action log.
    ViewLogs,
    /// View one's own action log.
    ViewOwnLogs,

    // Administration
    /// Add/remove members and change roles.
    ManageRoles,
    /// View and rotate the project API key.
    ManageApiKey,
    /// Edit project settings.
    ManageConfig,
    /// Lift bans and edit ban records.
    ManageBans,
    /// Browse and edit game datastores.
    ManageDatastores,
}

/// Defines the mapping from each role to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RolePolicies {
    /// Role → set of permissions.
    policies: HashMap<MemberRole, HashSet<ProjectPermission>>,
}

impl RolePolicies {
    /// Creates the fixed policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Moderator: stats + the day-to-day commands, own logs only
        let mut moderator = HashSet::new();
        moderator.insert(ProjectPermission::ViewStats);
        moderator.insert(ProjectPermission::ExecuteKick);
        moderator.insert(ProjectPermission::ExecuteWarn);
        moderator.insert(ProjectPermission::ExecuteAnnounce);
        moderator.insert(ProjectPermission::ViewOwnLogs);
        policies.insert(MemberRole::Moderator, moderator);

        // Admin: moderator + bans and full log visibility
        let mut admin = HashSet::new();
        admin.insert(ProjectPermission::ViewStats);
        admin.insert(ProjectPermission::ExecuteKick);
        admin.insert(ProjectPermission::ExecuteBan);
        admin.insert(ProjectPermission::ExecuteWarn);
        admin.insert(ProjectPermission::ExecuteAnnounce);
        admin.insert(ProjectPermission::ViewLogs);
        admin.insert(ProjectPermission::ViewOwnLogs);
        admin.insert(ProjectPermission::ManageBans);
        policies.insert(MemberRole::Admin, admin);

        // Owner: everything
        let owner: HashSet<ProjectPermission> = vec![
            ProjectPermission::ViewStats,
            ProjectPermission::ExecuteKick,
            ProjectPermission::ExecuteBan,
            ProjectPermission::ExecuteWarn,
            ProjectPermission::ExecuteAnnounce,
            ProjectPermission::ViewLogs,
            ProjectPermission::ViewOwnLogs,
            ProjectPermission::ManageRoles,
            ProjectPermission::ManageApiKey,
            ProjectPermission::ManageConfig,
            ProjectPermission::ManageBans,
            ProjectPermission::ManageDatastores,
        ]
        .into_iter()
        .collect();
        policies.insert(MemberRole::Owner, owner);

        Self { policies }
    }

    /// Returns the set of permissions for the given role.
    pub fn permissions_for_role(&self, role: &MemberRole) -> HashSet<ProjectPermission> {
        self.policies.get(role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified permission.
    ///
    /// Unknown pairings answer `false` rather than erroring.
    pub fn has_permission(&self, role: &MemberRole, permission: &ProjectPermission) -> bool {
        self.policies
            .get(role)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }
}

impl Default for RolePolicies {
    fn default() -> Self {
        Self::new()
    }
}
