//! In-memory snapshot storage.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::domain::ports::{SnapshotKey, SnapshotStorage, SnapshotStorageError};

/// Snapshot storage backed by a shared in-memory map.
///
/// Clones share the same map, so a test can keep one handle, hand the other
/// to a store, and later reopen a second store over the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStorage {
    entries: Rc<RefCell<BTreeMap<SnapshotKey, String>>>,
}

impl MemorySnapshotStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (SnapshotKey, S)>,
        S: Into<String>,
    {
        let storage = Self::new();
        storage.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, contents)| (key, contents.into())),
        );
        storage
    }

    /// Current text stored under `key`.
    #[must_use]
    pub fn get(&self, key: SnapshotKey) -> Option<String> {
        self.entries.borrow().get(&key).cloned()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    fn read(&self, key: SnapshotKey) -> Result<Option<String>, SnapshotStorageError> {
        Ok(self.get(key))
    }

    fn write(&self, key: SnapshotKey, contents: &str) -> Result<(), SnapshotStorageError> {
        self.entries.borrow_mut().insert(key, contents.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_contents() {
        let storage = MemorySnapshotStorage::new();
        let handle = storage.clone();

        storage
            .write(SnapshotKey::Users, "[]")
            .expect("memory writes succeed");

        assert_eq!(handle.get(SnapshotKey::Users).as_deref(), Some("[]"));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn missing_keys_read_as_none() {
        let storage = MemorySnapshotStorage::with_entries([(SnapshotKey::Roles, "[]")]);

        assert_eq!(storage.read(SnapshotKey::Users), Ok(None));
        assert_eq!(storage.read(SnapshotKey::Roles), Ok(Some("[]".to_owned())));
    }
}
