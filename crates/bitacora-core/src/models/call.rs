//! Call record model
//!
//! One telephony event as logged by the phone platform.

use super::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Agent name used by the telephony platform for calls with no human handler
pub const AUTOMATED_AGENT: &str = "Sistema";

/// Call direction enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    /// Inbound calls
    Inbound,
    /// Outbound calls
    Outbound,
}

impl CallDirection {
    /// Wire code of this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inbound => "Entrante",
            Self::Outbound => "Saliente",
        }
    }
}

impl fmt::Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Answered and finished normally
    Completed,
    /// Not answered
    Missed,
    /// Callee was busy
    Busy,
    /// Failed to connect
    Failed,
}

impl CallStatus {
    /// Every status, in display order
    pub const ALL: [CallStatus; 4] = [
        CallStatus::Completed,
        CallStatus::Missed,
        CallStatus::Busy,
        CallStatus::Failed,
    ];

    /// Wire code of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Completed => "completed",
            CallStatus::Missed => "missed",
            CallStatus::Busy => "busy",
            CallStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call record
///
/// `duration` is kept as the producer's `HH:MM:SS` text and parsed on demand,
/// so a malformed value surfaces where it is aggregated instead of being
/// silently dropped at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    /// Opaque unique identifier
    pub id: String,

    /// When the call started
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,

    /// Remote party number (E.164-like, not validated)
    pub phone_number: String,

    /// Talk time as `HH:MM:SS`
    pub duration: String,

    /// Call direction
    pub direction: CallDirection,

    /// Call outcome
    pub status: CallStatus,

    /// Handler name, `Sistema` for automated calls
    pub agent: String,

    /// Externally visible call reference (e.g. "RBN-2024-001")
    pub call_id: String,

    /// Playable recording reference, if one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording: Option<String>,
}

impl CallRecord {
    /// Check if the call completed
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == CallStatus::Completed
    }

    /// Check if this is an inbound call
    #[inline]
    pub fn is_inbound(&self) -> bool {
        self.direction == CallDirection::Inbound
    }

    /// Check if this is an outbound call
    #[inline]
    pub fn is_outbound(&self) -> bool {
        self.direction == CallDirection::Outbound
    }

    /// Check if no human agent handled the call
    pub fn is_automated(&self) -> bool {
        self.agent == AUTOMATED_AGENT
    }

    /// Check if a recording is available
    pub fn has_recording(&self) -> bool {
        self.recording.is_some()
    }

    /// Timestamp in display format
    pub fn display_timestamp(&self) -> String {
        timestamp::display(&self.timestamp)
    }
}
