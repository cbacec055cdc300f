//! Current snapshot holder
//!
//! Readers take an `Arc<Snapshot>` and keep working on it even if a reload
//! swaps in a newer one meanwhile. A snapshot is never mutated in place.

use bitacora_core::Snapshot;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Atomically swappable snapshot
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Snapshot in effect right now
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    /// Publish a new snapshot, returning the one it replaces
    pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        info!(
            movements = snapshot.movements.len(),
            calls = snapshot.calls.len(),
            loaded_at = %snapshot.loaded_at,
            "Publishing snapshot"
        );
        std::mem::replace(&mut *self.current.write(), Arc::new(snapshot))
    }
}
