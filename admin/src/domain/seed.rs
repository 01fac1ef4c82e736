//! Default records used when no snapshot has been saved.

use crate::domain::ids::{RoleId, UserId};
use crate::domain::permission::{PERMISSIONS, Permission};
use crate::domain::role::Role;
use crate::domain::user::User;

/// Name of the seeded administrator role.
pub const ADMIN_ROLE: &str = "admin";

/// Name of the seeded default role, also the default for new users.
pub const DEFAULT_ROLE: &str = "user";

/// Seeded users: one administrator and one regular account.
#[must_use]
pub fn default_users() -> Vec<User> {
    vec![
        User {
            id: UserId::new("1"),
            name: "Admin User".to_owned(),
            email: "admin@example.com".to_owned(),
            role: ADMIN_ROLE.to_owned(),
            is_active: true,
        },
        User {
            id: UserId::new("2"),
            name: "Regular User".to_owned(),
            email: "user@example.com".to_owned(),
            role: DEFAULT_ROLE.to_owned(),
            is_active: true,
        },
    ]
}

/// Seeded roles: `admin` holds every permission, `user` the view permissions.
#[must_use]
pub fn default_roles() -> Vec<Role> {
    vec![
        Role {
            id: RoleId::new("1"),
            name: ADMIN_ROLE.to_owned(),
            permissions: PERMISSIONS.to_vec(),
        },
        Role {
            id: RoleId::new("2"),
            name: DEFAULT_ROLE.to_owned(),
            permissions: vec![
                Permission::ViewUsers,
                Permission::ViewRoles,
                Permission::ViewSettings,
            ],
        },
    ]
}
