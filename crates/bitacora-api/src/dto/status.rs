//! Status classification DTOs

use bitacora_core::{RecordKind, Severity, StatusBadge};
use serde::Serialize;

/// Classification of one raw status code
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Record stream the code belongs to
    pub kind: RecordKind,
    /// Code as requested
    pub code: String,
    /// Display label
    pub label: &'static str,
    /// Severity tier
    pub tier: Severity,
}

impl StatusResponse {
    /// Combine a request with its badge
    pub fn new(kind: RecordKind, code: impl Into<String>, badge: StatusBadge) -> Self {
        Self {
            kind,
            code: code.into(),
            label: badge.label,
            tier: badge.tier,
        }
    }
}
