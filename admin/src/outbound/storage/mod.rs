//! Snapshot storage adapters.

mod atomic_io;
mod directory;
mod memory;

pub use directory::DirectorySnapshotStorage;
pub use memory::MemorySnapshotStorage;
