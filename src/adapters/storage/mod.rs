//! Persistence adapters.

mod file_snapshot_store;

pub use file_snapshot_store::FileSnapshotStore;
