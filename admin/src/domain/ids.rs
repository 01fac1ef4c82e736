//! Opaque entity identifiers.
//!
//! Identifiers are plain strings: seeded records use short numeric ids while
//! records created at runtime receive random UUID v4 strings. Nothing parses
//! the contents, so both shapes coexist in one collection.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a [`User`](crate::domain::User), unique within the user
    /// collection.
    UserId
}

define_entity_id! {
    /// Identifier of a [`Role`](crate::domain::Role), unique within the role
    /// collection.
    RoleId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_uuid_strings() {
        let id = UserId::random();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(RoleId::random(), RoleId::random());
    }

    #[test]
    fn serialises_transparently() {
        let json = serde_json::to_string(&UserId::new("1")).expect("serialise");
        assert_eq!(json, "\"1\"");
    }
}
