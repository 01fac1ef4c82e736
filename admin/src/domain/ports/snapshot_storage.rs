//! Port for durable snapshot storage.
//!
//! The store keeps each collection under its own key and overwrites the whole
//! value on every mutation. Adapters only need key/value semantics: read the
//! current text for a key, or replace it.

use std::fmt;

use super::define_port_error;

/// Keys the store persists under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SnapshotKey {
    /// JSON array of users.
    Users,
    /// JSON array of roles.
    Roles,
}

impl SnapshotKey {
    /// Every key, in the order snapshots are written.
    pub const ALL: [Self; 2] = [Self::Users, Self::Roles];

    /// Storage key text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Roles => "roles",
        }
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

define_port_error! {
    /// Errors raised by snapshot storage adapters.
    pub enum SnapshotStorageError {
        /// The stored value could not be read.
        Read {
            /// Key, or the adapter's location for it, being read.
            target: String,
            /// Adapter failure description.
            message: String,
        } => "failed to read snapshot '{target}': {message}",
        /// The value could not be written.
        Write {
            /// Key, or the adapter's location for it, being written.
            target: String,
            /// Adapter failure description.
            message: String,
        } => "failed to write snapshot '{target}': {message}",
    }
}

/// Key/value storage holding serialised collection snapshots.
///
/// Writes replace the previous value wholesale. Implementations must not
/// leave a partially written value behind on failure.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStorage {
    /// Fetch the text stored under `key`, or `None` if nothing was saved yet.
    fn read(&self, key: SnapshotKey) -> Result<Option<String>, SnapshotStorageError>;

    /// Replace the text stored under `key`.
    fn write(&self, key: SnapshotKey, contents: &str) -> Result<(), SnapshotStorageError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(SnapshotKey::Users, "users")]
    #[case(SnapshotKey::Roles, "roles")]
    fn keys_match_persisted_layout(#[case] key: SnapshotKey, #[case] text: &str) {
        assert_eq!(key.as_str(), text);
        assert_eq!(key.to_string(), text);
    }

    #[test]
    fn write_error_formats_correctly() {
        let err = SnapshotStorageError::write("users", "disk full");
        assert_eq!(err.to_string(), "failed to write snapshot 'users': disk full");
    }
}
