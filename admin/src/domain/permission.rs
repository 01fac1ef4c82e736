//! Fixed permission catalogue.
//!
//! Permissions form a closed set of six identifiers arranged as subsystem
//! (users, roles, settings) by action (view, manage). The catalogue never
//! changes at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Atomic capability identifier from the fixed catalogue.
///
/// Serialised as its upper-case identifier, e.g. `"VIEW_USERS"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Read access to the user list.
    ViewUsers,
    /// Create, edit and delete users.
    ManageUsers,
    /// Read access to the role list.
    ViewRoles,
    /// Create, edit and delete roles.
    ManageRoles,
    /// Read access to system settings.
    ViewSettings,
    /// Change system settings.
    ManageSettings,
}

/// Every permission in catalogue order.
pub const PERMISSIONS: [Permission; 6] = [
    Permission::ViewUsers,
    Permission::ManageUsers,
    Permission::ViewRoles,
    Permission::ManageRoles,
    Permission::ViewSettings,
    Permission::ManageSettings,
];

/// Subsystem a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionGroup {
    /// User management.
    Users,
    /// Role management.
    Roles,
    /// System settings.
    Settings,
}

/// Groups in the order the settings overview lists them.
pub const PERMISSION_GROUPS: [PermissionGroup; 3] = [
    PermissionGroup::Users,
    PermissionGroup::Roles,
    PermissionGroup::Settings,
];

impl PermissionGroup {
    /// Heading used when listing the group.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Roles => "Roles",
            Self::Settings => "Settings",
        }
    }
}

impl Permission {
    /// Upper-case identifier used in snapshots and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewUsers => "VIEW_USERS",
            Self::ManageUsers => "MANAGE_USERS",
            Self::ViewRoles => "VIEW_ROLES",
            Self::ManageRoles => "MANAGE_ROLES",
            Self::ViewSettings => "VIEW_SETTINGS",
            Self::ManageSettings => "MANAGE_SETTINGS",
        }
    }

    /// Subsystem the permission belongs to.
    #[must_use]
    pub const fn group(self) -> PermissionGroup {
        match self {
            Self::ViewUsers | Self::ManageUsers => PermissionGroup::Users,
            Self::ViewRoles | Self::ManageRoles => PermissionGroup::Roles,
            Self::ViewSettings | Self::ManageSettings => PermissionGroup::Settings,
        }
    }

    /// Human readable label, e.g. `"view users"`.
    #[must_use]
    pub fn label(self) -> String {
        self.as_str().replace('_', " ").to_lowercase()
    }
}

/// Returns the catalogue members belonging to `group`, in catalogue order.
///
/// # Examples
///
/// ```
/// use rbac_admin::domain::{Permission, PermissionGroup, permissions_in};
///
/// assert_eq!(
///     permissions_in(PermissionGroup::Roles),
///     vec![Permission::ViewRoles, Permission::ManageRoles],
/// );
/// ```
#[must_use]
pub fn permissions_in(group: PermissionGroup) -> Vec<Permission> {
    PERMISSIONS
        .into_iter()
        .filter(|permission| permission.group() == group)
        .collect()
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a catalogue permission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission '{value}'")]
pub struct UnknownPermission {
    /// The rejected input.
    pub value: String,
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    /// Parses the identifier case-insensitively; `-` is accepted for `_`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().replace('-', "_").to_uppercase();
        PERMISSIONS
            .into_iter()
            .find(|permission| permission.as_str() == normalised)
            .ok_or_else(|| UnknownPermission {
                value: value.to_owned(),
            })
    }
}
