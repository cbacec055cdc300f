//! Snapshot DTOs

use bitacora_core::Snapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of a published snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotInfo {
    /// Movement records in the snapshot
    pub movements: usize,
    /// Call records in the snapshot
    pub calls: usize,
    /// When the snapshot was read
    pub loaded_at: DateTime<Utc>,
}

impl From<&Snapshot> for SnapshotInfo {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            movements: snapshot.movements.len(),
            calls: snapshot.calls.len(),
            loaded_at: snapshot.loaded_at,
        }
    }
}
