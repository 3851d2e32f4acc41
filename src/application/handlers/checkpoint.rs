//! CheckpointHandler - periodic and shutdown state snapshots.
//!
//! The durable copy is written on a timer and again at shutdown, so unclean
//! termination loses at most one checkpoint interval of changes.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::state::CoreState;
use crate::domain::StateSnapshot;
use crate::ports::{SnapshotStore, SnapshotStoreError};

/// Handler that captures the core state into the snapshot store.
pub struct CheckpointHandler {
    state: Arc<CoreState>,
    store: Arc<dyn SnapshotStore>,
}

impl CheckpointHandler {
    pub fn new(state: Arc<CoreState>, store: Arc<dyn SnapshotStore>) -> Self {
        Self { state, store }
    }

    /// Captures and persists one snapshot.
    ///
    /// Failure is recovered: the service keeps running on in-memory state
    /// and the accepted data-loss risk is logged.
    pub async fn handle(&self) {
        let snapshot = self.state.snapshot();
        match self.store.save(&snapshot).await {
            Ok(()) => info!(
                orders = snapshot.ledger.len(),
                grants = snapshot.registry.len(),
                "State checkpoint written"
            ),
            Err(err) => warn!(error = %err,
                "Checkpoint failed, continuing with in-memory state only"),
        }
    }
}

/// Loads the last snapshot at startup, failing soft.
///
/// Missing file: normal first start, returns `None` quietly. Corrupt or
/// unreadable file: reported loudly so the operator notices the data loss,
/// then the process starts from empty state anyway.
pub async fn restore_or_empty(store: &dyn SnapshotStore) -> Option<StateSnapshot> {
    match store.load().await {
        Ok(Some(snapshot)) => {
            info!(
                orders = snapshot.ledger.len(),
                grants = snapshot.registry.len(),
                "Restored state from snapshot"
            );
            Some(snapshot)
        }
        Ok(None) => {
            info!("No snapshot found, starting with empty state");
            None
        }
        Err(err @ SnapshotStoreError::Corrupt(_)) => {
            error!(error = %err,
                "Snapshot is corrupt; starting with EMPTY state, previous data is lost");
            None
        }
        Err(err) => {
            error!(error = %err,
                "Snapshot could not be read; starting with EMPTY state");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enrollment::{EnrollmentWindow, RolloverPolicy};
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::registry::{DurationPolicy, RoleTier};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockSnapshotStore {
        saved: Mutex<Vec<StateSnapshot>>,
        load_result: Mutex<Option<Result<Option<StateSnapshot>, SnapshotStoreError>>>,
    }

    impl MockSnapshotStore {
        fn loading(result: Result<Option<StateSnapshot>, SnapshotStoreError>) -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                load_result: Mutex::new(Some(result)),
            }
        }
    }

    #[async_trait]
    impl SnapshotStore for MockSnapshotStore {
        async fn save(&self, snapshot: &StateSnapshot) -> Result<(), SnapshotStoreError> {
            self.saved.lock().unwrap().push(snapshot.clone());
            Ok(())
        }

        async fn load(&self) -> Result<Option<StateSnapshot>, SnapshotStoreError> {
            self.load_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Ok(None))
        }
    }

    fn state() -> Arc<CoreState> {
        let window =
            EnrollmentWindow::new(Timestamp::from_unix_secs(1_000_000), 7, 37).unwrap();
        Arc::new(CoreState::new(
            window,
            DurationPolicy::standard(),
            RolloverPolicy::FixedIncrement,
        ))
    }

    #[tokio::test]
    async fn checkpoint_saves_current_state() {
        let state = state();
        state.create_order(
            UserId::new("1").unwrap(),
            RoleTier::Fellows,
            Timestamp::from_unix_secs(1_000_100),
        );
        let store = Arc::new(MockSnapshotStore::default());
        let handler = CheckpointHandler::new(state.clone(), store.clone());

        handler.handle().await;

        let saved = store.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], state.snapshot());
    }

    #[tokio::test]
    async fn restore_returns_snapshot_when_present() {
        let snapshot = state().snapshot();
        let store = MockSnapshotStore::loading(Ok(Some(snapshot.clone())));

        assert_eq!(restore_or_empty(&store).await, Some(snapshot));
    }

    #[tokio::test]
    async fn restore_fails_soft_on_missing_snapshot() {
        let store = MockSnapshotStore::loading(Ok(None));
        assert!(restore_or_empty(&store).await.is_none());
    }

    #[tokio::test]
    async fn restore_fails_soft_on_corruption() {
        let store =
            MockSnapshotStore::loading(Err(SnapshotStoreError::Corrupt("bad json".into())));
        assert!(restore_or_empty(&store).await.is_none());
    }
}
