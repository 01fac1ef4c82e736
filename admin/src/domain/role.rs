//! Role records and their create/update payloads.

use serde::{Deserialize, Serialize};

use crate::domain::ids::RoleId;
use crate::domain::permission::Permission;

/// Named bundle of permissions assignable to users.
///
/// Names are conventionally unique but the store does not enforce it.
/// Permissions may repeat and their order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Store-assigned identifier.
    pub id: RoleId,
    /// Role name referenced by [`User::role`](crate::domain::User::role).
    pub name: String,
    /// Granted permissions.
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Returns `true` when the role grants `permission`.
    #[must_use]
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Fields supplied when creating a role; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRole {
    /// Role name.
    pub name: String,
    /// Granted permissions.
    pub permissions: Vec<Permission>,
}

impl NewRole {
    pub(crate) fn into_role(self, id: RoleId) -> Role {
        Role {
            id,
            name: self.name,
            permissions: self.permissions,
        }
    }
}

/// Partial update for a role. Omitted fields keep their current values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePatch {
    /// Replacement name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement permission list; replaces the whole list when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
}

impl RolePatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.permissions.is_none()
    }

    /// Shallow-merge the patch over `role`.
    pub fn apply_to(self, role: &mut Role) {
        if let Some(name) = self.name {
            role.name = name;
        }
        if let Some(permissions) = self.permissions {
            role.permissions = permissions;
        }
    }

    /// Returns a copy of `role` with the patch applied.
    #[must_use]
    pub fn merged(&self, role: &Role) -> Role {
        let mut merged = role.clone();
        self.clone().apply_to(&mut merged);
        merged
    }
}
