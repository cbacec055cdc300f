//! Immutable record store and snapshots
//!
//! A store is loaded once and then only read. Cloning shares the backing
//! allocation.

use crate::models::{CallRecord, MovementRecord};
use crate::traits::{CheckedRecord, RecordSource, Timestamped};
use crate::AppResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

/// Ordered, immutable collection of records of one kind
#[derive(Debug)]
pub struct RecordStore<T> {
    records: Arc<[T]>,
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }
}

impl<T> RecordStore<T> {
    /// Records in producer order
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Timestamped> RecordStore<T> {
    /// Record with the greatest timestamp (first one wins on ties)
    pub fn latest(&self) -> Option<&T> {
        self.records.iter().fold(None, |best: Option<&T>, record| match best {
            Some(b) if b.timestamp() >= record.timestamp() => Some(b),
            _ => Some(record),
        })
    }
}

impl<T: CheckedRecord> RecordStore<T> {
    /// Build a store, checking every record's invariants
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` naming the first offending record.
    pub fn new(records: Vec<T>) -> AppResult<Self> {
        for (index, record) in records.iter().enumerate() {
            record.check().map_err(|e| {
                warn!(index, error = %e, "Rejected record while building store");
                e
            })?;
        }
        Ok(Self {
            records: Arc::from(records),
        })
    }
}

impl<T> RecordSource<T> for RecordStore<T> {
    fn records(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> IntoIterator for &'a RecordStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Point-in-time view of both record streams
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub movements: RecordStore<MovementRecord>,
    pub calls: RecordStore<CallRecord>,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(
        movements: RecordStore<MovementRecord>,
        calls: RecordStore<CallRecord>,
        loaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            movements,
            calls,
            loaded_at,
        }
    }

    /// Snapshot with no records
    pub fn empty(loaded_at: DateTime<Utc>) -> Self {
        Self::new(RecordStore::default(), RecordStore::default(), loaded_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{timestamp, CallDirection, CallStatus, MovementStatus};
    use crate::AppError;

    fn movement(id: &str, ts: &str, status: MovementStatus) -> MovementRecord {
        MovementRecord {
            id: id.to_string(),
            timestamp: timestamp::parse(ts).unwrap(),
            operation: "Sincronización de Clientes".to_string(),
            records_count: 10,
            status,
            source: "Mikrowisp DB".to_string(),
            destination: "GHL CRM".to_string(),
            error_message: None,
        }
    }

    #[test]
    fn test_store_preserves_order() {
        let store = RecordStore::<MovementRecord>::new(vec![
            movement("2", "2024-01-22 12:15:10", MovementStatus::Success),
            movement("1", "2024-01-22 14:30:25", MovementStatus::Success),
        ])
        .unwrap();

        let ids: Vec<&str> = store.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_latest() {
        let store = RecordStore::<MovementRecord>::new(vec![
            movement("a", "2024-01-22 12:15:10", MovementStatus::Success),
            movement("b", "2024-01-22 14:30:25", MovementStatus::Pending),
            movement("c", "2024-01-22 14:30:25", MovementStatus::Success),
        ])
        .unwrap();

        assert_eq!(store.latest().map(|m| m.id.as_str()), Some("b"));
        assert!(RecordStore::<MovementRecord>::default().latest().is_none());
    }

    #[test]
    fn test_rejects_error_message_on_success() {
        let mut bad = movement("7", "2024-01-22 12:15:10", MovementStatus::Success);
        bad.error_message = Some("boom".to_string());

        let err = RecordStore::<MovementRecord>::new(vec![bad]).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains('7')));
    }

    #[test]
    fn test_accepts_error_without_message() {
        let store =
            RecordStore::<MovementRecord>::new(vec![movement("3", "2024-01-22 10:45:33", MovementStatus::Error)]);
        assert!(store.is_ok());
    }

    #[test]
    fn test_clone_shares_records() {
        let call = CallRecord {
            id: "1".to_string(),
            timestamp: timestamp::parse("2024-01-22 16:45:30").unwrap(),
            phone_number: "+1234567890".to_string(),
            duration: "00:05:23".to_string(),
            direction: CallDirection::Inbound,
            status: CallStatus::Completed,
            agent: "Ana García".to_string(),
            call_id: "RBN-2024-001".to_string(),
            recording: None,
        };
        let store = RecordStore::<CallRecord>::new(vec![call]).unwrap();
        let clone = store.clone();
        assert!(std::ptr::eq(store.as_slice(), clone.as_slice()));
    }
}
