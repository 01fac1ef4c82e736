//! Domain ports defining the edges of the hexagon.
//!
//! The store drives a single outbound port, [`SnapshotStorage`], so the same
//! domain code runs against the filesystem, an in-memory map, or a mock.

mod macros;
mod snapshot_storage;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use snapshot_storage::MockSnapshotStorage;
pub use snapshot_storage::{SnapshotKey, SnapshotStorage, SnapshotStorageError};
