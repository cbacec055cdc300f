//! Data movement model
//!
//! One synchronization event moving records from the billing/ISP system into
//! the CRM.

use super::timestamp;
use crate::{AppError, AppResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Movement status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementStatus {
    /// Records were delivered to the destination
    Success,
    /// The movement failed
    Error,
    /// The movement has not finished yet
    Pending,
}

impl MovementStatus {
    /// Every status, in display order
    pub const ALL: [MovementStatus; 3] = [
        MovementStatus::Success,
        MovementStatus::Error,
        MovementStatus::Pending,
    ];

    /// Wire code of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementStatus::Success => "success",
            MovementStatus::Error => "error",
            MovementStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for MovementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movement record
///
/// Stored exactly as the producing system delivered it; the core never
/// mutates a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRecord {
    /// Opaque unique identifier
    pub id: String,

    /// When the movement happened
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,

    /// What was synchronized (e.g. "Sincronización de Clientes")
    pub operation: String,

    /// Number of records moved (0 on failure, or not yet counted)
    pub records_count: u64,

    /// Outcome of the movement
    pub status: MovementStatus,

    /// Source system name
    pub source: String,

    /// Destination system name
    pub destination: String,

    /// Failure detail, only ever present on `error` movements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl MovementRecord {
    /// Check if the movement succeeded
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == MovementStatus::Success
    }

    /// Timestamp in display format
    pub fn display_timestamp(&self) -> String {
        timestamp::display(&self.timestamp)
    }

    /// Check the record-level invariants
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when a non-error movement carries an
    /// error message.
    pub fn validate(&self) -> AppResult<()> {
        if self.error_message.is_some() && self.status != MovementStatus::Error {
            return Err(AppError::Validation(format!(
                "movement {} has status {} but carries an error message",
                self.id, self.status
            )));
        }
        Ok(())
    }
}
