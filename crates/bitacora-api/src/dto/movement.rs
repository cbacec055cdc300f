//! Movement DTOs

use bitacora_core::models::{MovementRecord, MovementStatus};
use bitacora_core::{RecordStatus, StatusBadge};
use serde::Serialize;

/// Movement as shown in the log table
#[derive(Debug, Clone, Serialize)]
pub struct MovementResponse {
    /// Record identifier
    pub id: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    /// Operation description
    pub operation: String,
    /// Records moved
    pub records_count: u64,
    /// Raw status code
    pub status: MovementStatus,
    /// Label and tier for the status
    pub status_badge: StatusBadge,
    /// Producing system
    pub source: String,
    /// Receiving system
    pub destination: String,
    /// Failure detail for `error` movements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl From<&MovementRecord> for MovementResponse {
    fn from(movement: &MovementRecord) -> Self {
        Self {
            id: movement.id.clone(),
            timestamp: movement.display_timestamp(),
            operation: movement.operation.clone(),
            records_count: movement.records_count,
            status: movement.status,
            status_badge: movement.status.badge(),
            source: movement.source.clone(),
            destination: movement.destination.clone(),
            error_message: movement.error_message.clone(),
        }
    }
}
