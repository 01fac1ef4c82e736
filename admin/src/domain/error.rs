//! Errors surfaced by store operations.
//!
//! Precondition failures (`NotFound`, `InUse`) leave the collections exactly
//! as they were. Persistence failures happen after the in-memory change and
//! are reported so the caller can decide what to tell the operator.

use std::fmt;

use thiserror::Error;

use crate::domain::ports::{SnapshotKey, SnapshotStorageError};

/// Which collection an operation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The user collection.
    User,
    /// The role collection.
    Role,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Role => f.write_str("role"),
        }
    }
}

/// Errors returned by [`DirectoryStore`](crate::domain::DirectoryStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with the given id exists.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Collection that was searched.
        kind: EntityKind,
        /// Identifier that did not match.
        id: String,
    },

    /// The role is still assigned to at least one user.
    #[error("cannot delete role '{role}' while it is assigned to users")]
    InUse {
        /// Name of the role that was kept.
        role: String,
    },

    /// A stored snapshot is not valid JSON for its collection.
    #[error("snapshot '{key}' is corrupt: {message}")]
    CorruptSnapshot {
        /// Key of the unreadable snapshot.
        key: SnapshotKey,
        /// Parser error message.
        message: String,
    },

    /// A collection could not be encoded for storage.
    #[error("failed to encode snapshot '{key}': {message}")]
    Serialize {
        /// Key being encoded.
        key: SnapshotKey,
        /// Encoder error message.
        message: String,
    },

    /// The storage adapter failed.
    #[error(transparent)]
    Storage(#[from] SnapshotStorageError),
}

impl StoreError {
    pub(crate) fn user_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind: EntityKind::User,
            id: id.to_string(),
        }
    }

    pub(crate) fn role_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind: EntityKind::Role,
            id: id.to_string(),
        }
    }

    /// Returns `true` for [`StoreError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`StoreError::InUse`].
    #[must_use]
    pub const fn is_in_use(&self) -> bool {
        matches!(self, Self::InUse { .. })
    }
}
