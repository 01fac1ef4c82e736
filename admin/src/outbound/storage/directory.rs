//! Filesystem snapshot storage.
//!
//! Each key is stored as `<key>.json` inside a single directory opened with a
//! `cap-std` capability. Writes go through a temporary file and a rename.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use super::atomic_io::write_atomic;
use crate::domain::ports::{SnapshotKey, SnapshotStorage, SnapshotStorageError};

/// Snapshot storage rooted at one directory.
#[derive(Debug)]
pub struct DirectorySnapshotStorage {
    root: Utf8PathBuf,
    dir: Dir,
}

impl DirectorySnapshotStorage {
    /// Open `root`, creating it and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`io::Error`] if the directory cannot be created or opened.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        debug!(root = %root, "opened snapshot directory");
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Directory holding the snapshot files.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: SnapshotKey) -> Utf8PathBuf {
        self.root.join(file_name(key))
    }
}

fn file_name(key: SnapshotKey) -> String {
    format!("{}.json", key.as_str())
}

impl SnapshotStorage for DirectorySnapshotStorage {
    fn read(&self, key: SnapshotKey) -> Result<Option<String>, SnapshotStorageError> {
        match self.dir.read_to_string(file_name(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SnapshotStorageError::read(
                self.path_for(key).as_str(),
                err.to_string(),
            )),
        }
    }

    fn write(&self, key: SnapshotKey, contents: &str) -> Result<(), SnapshotStorageError> {
        write_atomic(&self.dir, &file_name(key), contents).map_err(|err| {
            SnapshotStorageError::write(self.path_for(key).as_str(), err.to_string())
        })
    }
}
