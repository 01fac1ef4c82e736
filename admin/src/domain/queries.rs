//! Search filters for the user and role listings.

use crate::domain::role::Role;
use crate::domain::user::User;

/// Role constraint applied to the user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoleFilter {
    /// Every role matches.
    #[default]
    All,
    /// Only users whose `role` equals this name.
    Named(String),
}

impl RoleFilter {
    /// Build a filter from an optional role name; `None` and `"all"` mean
    /// every role.
    #[must_use]
    pub fn from_option(role: Option<&str>) -> Self {
        match role {
            None | Some("all") => Self::All,
            Some(name) => Self::Named(name.to_owned()),
        }
    }

    fn admits(&self, role: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == role,
        }
    }
}

/// Free-text search plus role filter over users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Case-insensitive text matched against name or email.
    pub search: String,
    /// Role restriction.
    pub role: RoleFilter,
}

impl UserQuery {
    /// Returns `true` if `user` satisfies both the search text and the role
    /// filter.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        let needle = self.search.to_lowercase();
        let text_hit = contains_folded(&user.name, &needle) || contains_folded(&user.email, &needle);
        text_hit && self.role.admits(&user.role)
    }

    /// Users satisfying the query, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|user| self.matches(user)).collect()
    }
}

/// Roles whose name contains `search`, ignoring case.
#[must_use]
pub fn filter_roles<'a>(roles: &'a [Role], search: &str) -> Vec<&'a Role> {
    let needle = search.to_lowercase();
    roles
        .iter()
        .filter(|role| contains_folded(&role.name, &needle))
        .collect()
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}
