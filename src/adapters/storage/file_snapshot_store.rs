//! File-based snapshot store.
//!
//! Serializes the whole state to JSON. Writes go to a sibling `.tmp` file
//! first and are renamed into place, so a crash mid-write leaves the
//! previous snapshot intact.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::StateSnapshot;
use crate::ports::{SnapshotStore, SnapshotStoreError};

/// `SnapshotStore` implementation backed by a local JSON file.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, snapshot: &StateSnapshot) -> Result<(), SnapshotStoreError> {
        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| SnapshotStoreError::Serialization(e.to_string()))?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| SnapshotStoreError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| SnapshotStoreError::Io(e.to_string()))?;

        Ok(())
    }

    async fn load(&self) -> Result<Option<StateSnapshot>, SnapshotStoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SnapshotStoreError::Io(e.to_string())),
        };

        let snapshot = serde_json::from_slice(&bytes)
            .map_err(|e| SnapshotStoreError::Corrupt(e.to_string()))?;
        Ok(Some(snapshot))
    }
}
