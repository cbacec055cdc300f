//! Call DTOs

use bitacora_core::duration;
use bitacora_core::models::{CallDirection, CallRecord, CallStatus};
use bitacora_core::{RecordStatus, StatusBadge};
use bitacora_services::CallStats;
use serde::Serialize;

/// Recording column text when a recording exists
pub const RECORDING_AVAILABLE: &str = "Reproducir";

/// Recording column text when there is none
pub const RECORDING_UNAVAILABLE: &str = "No disponible";

/// Call as shown in the log table
#[derive(Debug, Clone, Serialize)]
pub struct CallResponse {
    /// Record identifier
    pub id: String,
    /// Telephony platform call identifier
    pub call_id: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    /// Remote party
    pub phone_number: String,
    /// Talk time as supplied (`HH:MM:SS`)
    pub duration: String,
    /// Raw direction code
    pub direction: CallDirection,
    /// Direction label
    pub direction_label: &'static str,
    /// Raw status code
    pub status: CallStatus,
    /// Label and tier for the status
    pub status_badge: StatusBadge,
    /// Handling agent
    pub agent: String,
    /// No human agent handled the call
    pub automated: bool,
    /// Recording reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording: Option<String>,
    /// Recording column text
    pub recording_label: &'static str,
}

impl From<&CallRecord> for CallResponse {
    fn from(call: &CallRecord) -> Self {
        Self {
            id: call.id.clone(),
            call_id: call.call_id.clone(),
            timestamp: call.display_timestamp(),
            phone_number: call.phone_number.clone(),
            duration: call.duration.clone(),
            direction: call.direction,
            direction_label: call.direction.label(),
            status: call.status,
            status_badge: call.status.badge(),
            agent: call.agent.clone(),
            automated: call.is_automated(),
            recording: call.recording.clone(),
            recording_label: if call.has_recording() {
                RECORDING_AVAILABLE
            } else {
                RECORDING_UNAVAILABLE
            },
        }
    }
}

/// Call summary cards
#[derive(Debug, Clone, Serialize)]
pub struct CallStatsResponse {
    /// Raw counters
    #[serde(flatten)]
    pub stats: CallStats,

    /// Completed talk time as `HH:MM:SS`
    pub total_completed_duration_display: String,

    /// Mean completed talk time as `HH:MM:SS`
    pub average_completed_duration: String,
}

impl From<CallStats> for CallStatsResponse {
    fn from(stats: CallStats) -> Self {
        Self {
            total_completed_duration_display: stats.total_completed_duration_display(),
            average_completed_duration: duration::format(stats.average_completed_duration()),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitacora_core::models::timestamp;

    fn call(agent: &str, recording: Option<&str>) -> CallRecord {
        CallRecord {
            id: "4".to_string(),
            timestamp: timestamp::parse("2024-01-22 13:35:42").unwrap(),
            phone_number: "+1987654321".to_string(),
            duration: "00:08:17".to_string(),
            direction: CallDirection::Outbound,
            status: CallStatus::Completed,
            agent: agent.to_string(),
            call_id: "RBN-2024-004".to_string(),
            recording: recording.map(str::to_string),
        }
    }

    #[test]
    fn test_call_response_labels() {
        let response = CallResponse::from(&call("Carlos López", Some("recording_004.mp3")));
        assert_eq!(response.direction_label, "Saliente");
        assert_eq!(response.status_badge.label, "Completada");
        assert_eq!(response.recording_label, RECORDING_AVAILABLE);
        assert!(!response.automated);
    }

    #[test]
    fn test_automated_call_without_recording() {
        let response = CallResponse::from(&call("Sistema", None));
        assert!(response.automated);
        assert_eq!(response.recording_label, "No disponible");

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("recording").is_none());
        assert_eq!(value["direction"], "outbound");
    }

    #[test]
    fn test_call_stats_response() {
        let stats = CallStats {
            total: 3,
            completed_count: 2,
            total_completed_duration: 488,
            ..Default::default()
        };

        let value = serde_json::to_value(CallStatsResponse::from(stats)).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["total_completed_duration"], 488);
        assert_eq!(value["total_completed_duration_display"], "00:08:08");
        assert_eq!(value["average_completed_duration"], "00:04:04");
    }
}
