//! Read-only view over the store's collections.

use crate::domain::ids::{RoleId, UserId};
use crate::domain::permission::{PERMISSIONS, Permission};
use crate::domain::role::Role;
use crate::domain::user::User;

/// Borrowed, read-only view of the full store state.
///
/// Listeners and views receive this after a mutation has been fully applied,
/// so every read reflects the latest collections.
#[derive(Debug, Clone, Copy)]
pub struct StoreState<'a> {
    users: &'a [User],
    roles: &'a [Role],
}

impl<'a> StoreState<'a> {
    pub(crate) const fn new(users: &'a [User], roles: &'a [Role]) -> Self {
        Self { users, roles }
    }

    /// Users in insertion order.
    #[must_use]
    pub const fn users(&self) -> &'a [User] {
        self.users
    }

    /// Roles in insertion order.
    #[must_use]
    pub const fn roles(&self) -> &'a [Role] {
        self.roles
    }

    /// The fixed permission catalogue.
    #[must_use]
    pub const fn permissions(&self) -> &'static [Permission] {
        &PERMISSIONS
    }

    /// Look up a user by id.
    #[must_use]
    pub fn find_user(&self, id: &UserId) -> Option<&'a User> {
        self.users.iter().find(|user| &user.id == id)
    }

    /// Look up a role by id.
    #[must_use]
    pub fn find_role(&self, id: &RoleId) -> Option<&'a Role> {
        self.roles.iter().find(|role| &role.id == id)
    }

    /// First role whose name equals `name`.
    #[must_use]
    pub fn find_role_by_name(&self, name: &str) -> Option<&'a Role> {
        self.roles.iter().find(|role| role.name == name)
    }
}
