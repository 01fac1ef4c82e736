//! User records and their create/update payloads.

use serde::{Deserialize, Serialize};

use crate::domain::ids::UserId;

/// Account record managed by the store.
///
/// ## Invariants
/// - `id` is assigned by the store and never changes.
/// - `role` names a [`Role`](crate::domain::Role) by convention only; the
///   link is checked when a role is deleted, never when a user is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact address; uniqueness is not enforced.
    pub email: String,
    /// Name of the assigned role.
    pub role: String,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Fields supplied when creating a user; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Name of the assigned role.
    pub role: String,
    /// Whether the account is active.
    pub is_active: bool,
}

impl NewUser {
    pub(crate) fn into_user(self, id: UserId) -> User {
        let Self {
            name,
            email,
            role,
            is_active,
        } = self;
        User {
            id,
            name,
            email,
            role,
            is_active,
        }
    }
}

/// Partial update for a user. Omitted fields keep their current values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// Replacement display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Replacement role name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Replacement status flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserPatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }

    /// Shallow-merge the patch over `user`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }

    /// Returns a copy of `user` with the patch applied.
    #[must_use]
    pub fn merged(&self, user: &User) -> User {
        let mut merged = user.clone();
        self.clone().apply_to(&mut merged);
        merged
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn user() -> User {
        User {
            id: UserId::new("1"),
            name: "X".to_owned(),
            email: "x@x.com".to_owned(),
            role: "user".to_owned(),
            is_active: true,
        }
    }

    #[rstest]
    fn patch_only_touches_supplied_fields(user: User) {
        let patch = UserPatch {
            is_active: Some(false),
            ..UserPatch::default()
        };

        let merged = patch.merged(&user);

        assert_eq!(
            merged,
            User {
                is_active: false,
                ..user
            }
        );
    }

    #[rstest]
    fn empty_patch_is_identity(user: User) {
        let patch = UserPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.merged(&user), user);
    }

    #[rstest]
    fn serialises_with_camel_case_fields(user: User) {
        let value = serde_json::to_value(&user).expect("serialise");
        assert_eq!(
            value,
            json!({
                "id": "1",
                "name": "X",
                "email": "x@x.com",
                "role": "user",
                "isActive": true
            })
        );
    }

    #[test]
    fn patch_deserialises_from_partial_json() {
        let patch: UserPatch =
            serde_json::from_value(json!({ "isActive": false })).expect("deserialise");
        assert_eq!(patch.is_active, Some(false));
        assert!(patch.name.is_none());
    }
}
