//! Snapshot store port: durable full-state persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::StateSnapshot;

/// Errors from the snapshot store.
///
/// All of these are recovered: the service continues with in-memory state
/// and logs the accepted data-loss risk. Corruption found at startup is
/// logged loudly so an operator notices, but the process still starts empty.
#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    #[error("Snapshot I/O failed: {0}")]
    Io(String),

    #[error("Snapshot could not be serialized: {0}")]
    Serialization(String),

    #[error("Snapshot file is malformed: {0}")]
    Corrupt(String),
}

/// Port for persisting and restoring the whole core state.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Writes the snapshot, fully replacing the previous one.
    ///
    /// Implementations write to a temporary file and atomically move it in
    /// place so a crash mid-write cannot truncate the durable copy.
    async fn save(&self, snapshot: &StateSnapshot) -> Result<(), SnapshotStoreError>;

    /// Loads the last snapshot.
    ///
    /// Returns `Ok(None)` when no snapshot exists yet (first start).
    ///
    /// # Errors
    ///
    /// `Corrupt` if a file exists but cannot be decoded.
    async fn load(&self) -> Result<Option<StateSnapshot>, SnapshotStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SnapshotStore) {}
    }
}
