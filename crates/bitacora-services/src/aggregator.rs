//! Summary statistics
//!
//! Feeds the summary cards at the top of each log page. Aggregation always
//! runs over the full store; the search box only narrows the detail table.

use crate::constants::PERCENT_SCALE;
use bitacora_core::models::{CallRecord, CallStatus, MovementRecord, MovementStatus};
use bitacora_core::traits::RecordSource;
use bitacora_core::{duration, AppError, AppResult};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

/// Movement summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovementStats {
    /// Number of movements
    pub total: u64,

    /// Movements with status `success`
    pub success_count: u64,

    /// Movements with status `error`
    pub error_count: u64,

    /// Movements with status `pending`
    pub pending_count: u64,

    /// Records delivered by successful movements
    pub records_transferred: u64,

    /// Percentage of successful movements (one decimal place)
    pub success_rate: Decimal,
}

/// Call summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallStats {
    /// Number of calls
    pub total: u64,

    /// Calls with status `completed`
    pub completed_count: u64,

    /// Calls with status `missed`
    pub missed_count: u64,

    /// Calls with status `busy`
    pub busy_count: u64,

    /// Calls with status `failed`
    pub failed_count: u64,

    /// Inbound calls
    pub inbound_count: u64,

    /// Outbound calls
    pub outbound_count: u64,

    /// Calls with a playable recording
    pub with_recording_count: u64,

    /// Talk time of completed calls, in seconds
    pub total_completed_duration: u64,
}

impl CallStats {
    /// Completed talk time as `HH:MM:SS`
    pub fn total_completed_duration_display(&self) -> String {
        duration::format(self.total_completed_duration)
    }

    /// Mean talk time of completed calls in whole seconds (0 when none)
    pub fn average_completed_duration(&self) -> u64 {
        self.total_completed_duration
            .checked_div(self.completed_count)
            .unwrap_or(0)
    }
}

/// Record kinds with a summary
pub trait Aggregate: Sized {
    type Stats;

    /// Summarize a full set of records
    fn aggregate(records: &[Self]) -> AppResult<Self::Stats>;
}

impl Aggregate for MovementRecord {
    type Stats = MovementStats;

    fn aggregate(records: &[Self]) -> AppResult<MovementStats> {
        let mut stats = MovementStats {
            total: records.len() as u64,
            ..Default::default()
        };

        for movement in records {
            match movement.status {
                MovementStatus::Success => {
                    stats.success_count += 1;
                    stats.records_transferred =
                        stats.records_transferred.saturating_add(movement.records_count);
                }
                MovementStatus::Error => stats.error_count += 1,
                MovementStatus::Pending => stats.pending_count += 1,
            }
        }

        stats.success_rate = percentage(stats.success_count, stats.total);

        Ok(stats)
    }
}

impl Aggregate for CallRecord {
    type Stats = CallStats;

    /// # Errors
    ///
    /// Returns `AppError::MalformedDuration` if a completed call carries an
    /// unparsable duration. Durations of other calls are never read.
    fn aggregate(records: &[Self]) -> AppResult<CallStats> {
        let mut stats = CallStats {
            total: records.len() as u64,
            ..Default::default()
        };

        for call in records {
            match call.status {
                CallStatus::Completed => {
                    stats.completed_count += 1;
                    let seconds = duration::parse(&call.duration).map_err(|e| {
                        warn!(call_id = %call.call_id, "Completed call with malformed duration");
                        e
                    })?;
                    stats.total_completed_duration = stats
                        .total_completed_duration
                        .checked_add(seconds)
                        .ok_or_else(|| {
                            AppError::Internal("completed talk time overflowed".to_string())
                        })?;
                }
                CallStatus::Missed => stats.missed_count += 1,
                CallStatus::Busy => stats.busy_count += 1,
                CallStatus::Failed => stats.failed_count += 1,
            }

            if call.is_inbound() {
                stats.inbound_count += 1;
            } else {
                stats.outbound_count += 1;
            }

            if call.has_recording() {
                stats.with_recording_count += 1;
            }
        }

        Ok(stats)
    }
}

/// Summarize every record a source holds
///
/// # Errors
///
/// Propagates the record kind's aggregation errors.
pub fn summarize<T, S>(source: &S) -> AppResult<T::Stats>
where
    T: Aggregate,
    S: RecordSource<T> + ?Sized,
{
    let records = source.records();
    debug!(total = records.len(), "Summarizing records");
    T::aggregate(records)
}

/// `part / whole * 100`, rounded to the configured scale; 0 when `whole` is 0
pub(crate) fn percentage(part: u64, whole: u64) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    let mut rate = Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole);
    rate.rescale(PERCENT_SCALE);
    rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitacora_core::models::{timestamp, CallDirection};
    use rust_decimal_macros::dec;

    fn movement(status: MovementStatus, records_count: u64) -> MovementRecord {
        MovementRecord {
            id: "m".to_string(),
            timestamp: timestamp::parse("2024-01-22 14:30:25").unwrap(),
            operation: "Sincronización de Clientes".to_string(),
            records_count,
            status,
            source: "Mikrowisp DB".to_string(),
            destination: "GHL CRM".to_string(),
            error_message: None,
        }
    }

    fn call(status: CallStatus, direction: CallDirection, duration: &str) -> CallRecord {
        CallRecord {
            id: "c".to_string(),
            timestamp: timestamp::parse("2024-01-22 16:45:30").unwrap(),
            phone_number: "+1234567890".to_string(),
            duration: duration.to_string(),
            direction,
            status,
            agent: "Ana García".to_string(),
            call_id: "RBN-2024-001".to_string(),
            recording: None,
        }
    }

    #[test]
    fn test_summarize_empty() {
        let movements: Vec<MovementRecord> = vec![];
        let stats = summarize(&movements).unwrap();
        assert_eq!(stats, MovementStats::default());
        assert_eq!(stats.success_rate, Decimal::ZERO);

        let calls: Vec<CallRecord> = vec![];
        let stats = summarize(&calls).unwrap();
        assert_eq!(stats, CallStats::default());
        assert_eq!(stats.average_completed_duration(), 0);
    }

    #[test]
    fn test_movement_counts() {
        let movements = vec![
            movement(MovementStatus::Success, 150),
            movement(MovementStatus::Success, 75),
            movement(MovementStatus::Error, 0),
            movement(MovementStatus::Pending, 300),
        ];
        let stats = summarize(&movements).unwrap();

        assert_eq!(stats.total, 4);
        assert_eq!(stats.success_count, 2);
        assert_eq!(stats.error_count, 1);
        assert_eq!(stats.pending_count, 1);
        assert_eq!(stats.records_transferred, 225);
        assert_eq!(stats.success_rate, dec!(50.0));
    }

    #[test]
    fn test_records_transferred_saturates() {
        let half = u64::MAX / 2 + 1;
        let movements = vec![
            movement(MovementStatus::Success, half),
            movement(MovementStatus::Success, half),
        ];
        let stats = summarize(&movements).unwrap();
        assert_eq!(stats.records_transferred, u64::MAX);
        assert_eq!(stats.success_count, 2);
        assert_eq!(stats.success_rate, dec!(100.0));
    }

    #[test]
    fn test_error_without_message_is_counted() {
        let movements = vec![movement(MovementStatus::Error, 0)];
        let stats = summarize(&movements).unwrap();
        assert_eq!(stats.error_count, 1);
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn test_completed_duration_only_counts_completed() {
        let calls = vec![
            call(CallStatus::Completed, CallDirection::Inbound, "00:05:23"),
            call(CallStatus::Missed, CallDirection::Inbound, "00:00:00"),
            call(CallStatus::Completed, CallDirection::Outbound, "00:02:45"),
        ];
        let stats = summarize(&calls).unwrap();

        assert_eq!(stats.total_completed_duration, 488);
        assert_eq!(stats.completed_count, 2);
        assert_eq!(stats.missed_count, 1);
        assert_eq!(stats.inbound_count, 2);
        assert_eq!(stats.outbound_count, 1);
        assert_eq!(stats.total_completed_duration_display(), "00:08:08");
        assert_eq!(stats.average_completed_duration(), 244);
    }

    #[test]
    fn test_non_completed_duration_ignored_even_if_nonzero() {
        let calls = vec![
            call(CallStatus::Busy, CallDirection::Inbound, "00:00:12"),
            call(CallStatus::Failed, CallDirection::Outbound, "not-a-duration"),
        ];
        let stats = summarize(&calls).unwrap();

        assert_eq!(stats.total_completed_duration, 0);
        assert_eq!(stats.busy_count, 1);
        assert_eq!(stats.failed_count, 1);
    }

    #[test]
    fn test_malformed_completed_duration_fails() {
        let calls = vec![
            call(CallStatus::Completed, CallDirection::Inbound, "00:05:23"),
            call(CallStatus::Completed, CallDirection::Inbound, "5 minutes"),
        ];
        let err = summarize(&calls).unwrap_err();
        assert!(matches!(err, AppError::MalformedDuration(ref t) if t == "5 minutes"));
    }

    #[test]
    fn test_total_matches_len() {
        for n in [0usize, 1, 7, 100] {
            let calls: Vec<CallRecord> = (0..n)
                .map(|i| {
                    let status = CallStatus::ALL[i % CallStatus::ALL.len()];
                    call(status, CallDirection::Inbound, "00:00:01")
                })
                .collect();
            assert_eq!(summarize(&calls).unwrap().total, n as u64);
        }
    }

    #[test]
    fn test_large_totals_stay_exact() {
        let calls: Vec<CallRecord> = (0..10_000)
            .map(|_| call(CallStatus::Completed, CallDirection::Outbound, "99:59:59"))
            .collect();
        let stats = summarize(&calls).unwrap();
        assert_eq!(stats.total_completed_duration, 10_000 * 359_999);
        assert_eq!(
            stats.total_completed_duration_display(),
            duration::format(3_599_990_000)
        );
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), Decimal::ZERO);
        assert_eq!(percentage(1, 3), dec!(33.3));
        assert_eq!(percentage(197, 200), dec!(98.5));
        assert_eq!(percentage(2, 3), dec!(66.7));
        assert_eq!(percentage(2, 4).to_string(), "50.0");
    }
}
