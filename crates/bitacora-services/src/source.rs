//! JSON file record source
//!
//! The producing systems drop one JSON array per record stream on disk.
//! Each load reads the files fresh and builds a validated snapshot.

use bitacora_core::config::SnapshotConfig;
use bitacora_core::models::{CallRecord, MovementRecord};
use bitacora_core::traits::CheckedRecord;
use bitacora_core::{AppError, AppResult, RecordStore, Snapshot};
use chrono::Utc;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

/// Reads movement and call arrays from JSON files
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    movements_path: PathBuf,
    calls_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(movements_path: impl Into<PathBuf>, calls_path: impl Into<PathBuf>) -> Self {
        Self {
            movements_path: movements_path.into(),
            calls_path: calls_path.into(),
        }
    }

    pub fn from_config(config: &SnapshotConfig) -> Self {
        Self::new(&config.movements_path, &config.calls_path)
    }

    /// Load the movement stream
    pub async fn load_movements(&self) -> AppResult<RecordStore<MovementRecord>> {
        load_store(&self.movements_path).await
    }

    /// Load the call stream
    pub async fn load_calls(&self) -> AppResult<RecordStore<CallRecord>> {
        load_store(&self.calls_path).await
    }

    /// Load both streams into a new snapshot
    ///
    /// # Errors
    ///
    /// - `AppError::SnapshotLoad` if a file cannot be read
    /// - `AppError::Serialization` if a file is not a valid record array
    /// - `AppError::Validation` if a record breaks its invariants
    #[instrument(skip(self), fields(movements = %self.movements_path.display(), calls = %self.calls_path.display()))]
    pub async fn load_snapshot(&self) -> AppResult<Snapshot> {
        let (movements, calls) = tokio::try_join!(self.load_movements(), self.load_calls())?;

        info!(
            movements = movements.len(),
            calls = calls.len(),
            "Snapshot loaded"
        );

        Ok(Snapshot::new(movements, calls, Utc::now()))
    }
}

async fn load_store<T>(path: &Path) -> AppResult<RecordStore<T>>
where
    T: DeserializeOwned + CheckedRecord,
{
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to read snapshot file");
        AppError::SnapshotLoad(format!("{}: {}", path.display(), e))
    })?;

    let records: Vec<T> = serde_json::from_slice(&bytes).map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to decode snapshot file");
        AppError::Serialization(format!("{}: {}", path.display(), e))
    })?;

    RecordStore::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitacora_core::models::{CallStatus, MovementStatus};

    const MOVEMENTS: &str = r#"[
        {
            "id": "1",
            "timestamp": "2024-01-22 14:30:25",
            "operation": "Sincronización de Clientes",
            "recordsCount": 150,
            "status": "success",
            "source": "Mikrowisp DB",
            "destination": "GHL CRM"
        },
        {
            "id": "3",
            "timestamp": "2024-01-22 10:45:33",
            "operation": "Migración de Servicios",
            "recordsCount": 0,
            "status": "error",
            "source": "Mikrowisp DB",
            "destination": "GHL CRM",
            "errorMessage": "Error de conexión con la API de GHL"
        }
    ]"#;

    const CALLS: &str = r#"[
        {
            "id": "1",
            "timestamp": "2024-01-22 16:45:30",
            "phoneNumber": "+1234567890",
            "duration": "00:05:23",
            "direction": "inbound",
            "status": "completed",
            "agent": "Ana García",
            "callId": "RBN-2024-001",
            "recording": "recording_001.mp3"
        }
    ]"#;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bitacora-source-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_snapshot() {
        let source = JsonFileSource::new(
            write_fixture("ok-movements.json", MOVEMENTS),
            write_fixture("ok-calls.json", CALLS),
        );

        let snapshot = source.load_snapshot().await.unwrap();

        assert_eq!(snapshot.movements.len(), 2);
        assert_eq!(snapshot.movements.as_slice()[1].status, MovementStatus::Error);
        assert_eq!(
            snapshot.movements.as_slice()[1].error_message.as_deref(),
            Some("Error de conexión con la API de GHL")
        );
        assert_eq!(snapshot.calls.len(), 1);
        assert_eq!(snapshot.calls.as_slice()[0].status, CallStatus::Completed);
    }

    #[tokio::test]
    async fn test_missing_file_is_snapshot_load_error() {
        let source = JsonFileSource::new(
            "/nonexistent/bitacora/movements.json",
            write_fixture("missing-calls.json", CALLS),
        );

        let err = source.load_snapshot().await.unwrap_err();
        assert!(matches!(err, AppError::SnapshotLoad(_)));
    }

    #[tokio::test]
    async fn test_unknown_status_is_decode_error() {
        let path = write_fixture(
            "bad-calls.json",
            &CALLS.replace("\"completed\"", "\"Completed\""),
        );
        let source = JsonFileSource::new(write_fixture("bad-movements.json", MOVEMENTS), path);

        let err = source.load_calls().await.unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_invalid_record_is_validation_error() {
        let bad = MOVEMENTS.replace("\"status\": \"success\"", "\"status\": \"success\", \"errorMessage\": \"x\"");
        let source = JsonFileSource::new(
            write_fixture("invalid-movements.json", &bad),
            write_fixture("invalid-calls.json", CALLS),
        );

        let err = tokio_test::block_on(source.load_movements()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
