//! Status classification
//!
//! Maps each record status onto the label and severity tier the dashboard
//! shows in its status badges. Tiers drive presentation color only.

use crate::models::{CallStatus, MovementStatus};
use crate::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record stream a status belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Data synchronization movements
    Movement,
    /// Telephony call records
    Call,
}

impl RecordKind {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "movement" | "movements" => Some(RecordKind::Movement),
            "call" | "calls" => Some(RecordKind::Call),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Movement => write!(f, "movement"),
            RecordKind::Call => write!(f, "call"),
        }
    }
}

/// Presentation severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Positive,
    Caution,
    Negative,
}

/// Label and tier for one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    /// Display label
    pub label: &'static str,
    /// Severity tier
    pub tier: Severity,
}

/// A closed set of status codes with fixed labels and tiers
pub trait RecordStatus: Copy + Sized + 'static {
    /// Record stream this status belongs to
    const KIND: RecordKind;

    /// Every member of the closed set
    fn all() -> &'static [Self];

    /// Wire code
    fn code(&self) -> &'static str;

    /// Display label
    fn label(&self) -> &'static str;

    /// Severity tier
    fn tier(&self) -> Severity;

    /// Label and tier together
    fn badge(&self) -> StatusBadge {
        StatusBadge {
            label: self.label(),
            tier: self.tier(),
        }
    }

    /// Resolve a wire code against the closed set
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownStatus` if the code is not a member.
    fn from_code(code: &str) -> AppResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.code() == code)
            .ok_or_else(|| AppError::UnknownStatus {
                kind: Self::KIND,
                status: code.to_string(),
            })
    }
}

impl RecordStatus for MovementStatus {
    const KIND: RecordKind = RecordKind::Movement;

    fn all() -> &'static [Self] {
        &MovementStatus::ALL
    }

    fn code(&self) -> &'static str {
        self.as_str()
    }

    fn label(&self) -> &'static str {
        match self {
            MovementStatus::Success => "Exitoso",
            MovementStatus::Error => "Error",
            MovementStatus::Pending => "Pendiente",
        }
    }

    fn tier(&self) -> Severity {
        match self {
            MovementStatus::Success => Severity::Positive,
            MovementStatus::Pending => Severity::Caution,
            MovementStatus::Error => Severity::Negative,
        }
    }
}

impl RecordStatus for CallStatus {
    const KIND: RecordKind = RecordKind::Call;

    fn all() -> &'static [Self] {
        &CallStatus::ALL
    }

    fn code(&self) -> &'static str {
        self.as_str()
    }

    fn label(&self) -> &'static str {
        match self {
            CallStatus::Completed => "Completada",
            CallStatus::Missed => "Perdida",
            CallStatus::Busy => "Ocupado",
            CallStatus::Failed => "Fallida",
        }
    }

    fn tier(&self) -> Severity {
        match self {
            CallStatus::Completed => Severity::Positive,
            CallStatus::Busy => Severity::Caution,
            CallStatus::Missed | CallStatus::Failed => Severity::Negative,
        }
    }
}

/// Classify a raw status code for the given record stream
///
/// Codes are matched exactly against the lowercase wire codes.
///
/// # Errors
///
/// Returns `AppError::UnknownStatus` when the code is outside the closed set
/// for `kind`.
pub fn classify(kind: RecordKind, status_code: &str) -> AppResult<StatusBadge> {
    match kind {
        RecordKind::Movement => MovementStatus::from_code(status_code).map(|s| s.badge()),
        RecordKind::Call => CallStatus::from_code(status_code).map(|s| s.badge()),
    }
}
