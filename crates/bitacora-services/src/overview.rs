//! Dashboard overview
//!
//! Headline metrics for the landing page, derived from both record streams
//! of a snapshot.

use crate::aggregator::summarize;
use bitacora_core::models::{timestamp, CallRecord};
use bitacora_core::{duration, AppResult, Snapshot};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

/// Sync health section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOverview {
    /// Timestamp of the most recent movement (`YYYY-MM-DD HH:MM:SS`)
    pub last_sync: Option<String>,

    /// Records delivered by successful movements
    pub records_transferred: u64,

    /// Percentage of successful movements
    pub success_rate: Decimal,
}

/// Call activity section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallOverview {
    /// Calls placed or received on the reference day
    pub total_today: u64,

    /// Completed calls on the reference day
    pub completed_today: u64,

    /// Mean talk time of completed calls across the snapshot (`HH:MM:SS`)
    pub average_duration: String,
}

/// Dashboard overview response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOverview {
    /// Reference day for the "today" figures
    pub date: String,
    pub sync: SyncOverview,
    pub calls: CallOverview,
}

/// Compute the dashboard overview for a reference day
///
/// # Errors
///
/// Returns `AppError::MalformedDuration` if a completed call has an
/// unparsable duration.
#[instrument(skip(snapshot), fields(movements = snapshot.movements.len(), calls = snapshot.calls.len()))]
pub fn overview(snapshot: &Snapshot, today: NaiveDate) -> AppResult<DashboardOverview> {
    let movement_stats = summarize(&snapshot.movements)?;
    let call_stats = summarize(&snapshot.calls)?;

    let is_today = |call: &&CallRecord| call.timestamp.date() == today;
    let total_today = snapshot.calls.iter().filter(is_today).count() as u64;
    let completed_today = snapshot
        .calls
        .iter()
        .filter(is_today)
        .filter(|call| call.is_completed())
        .count() as u64;

    let last_sync = snapshot
        .movements
        .latest()
        .map(|movement| timestamp::display(&movement.timestamp));

    debug!(total_today, completed_today, "Computed dashboard overview");

    Ok(DashboardOverview {
        date: today.format("%Y-%m-%d").to_string(),
        sync: SyncOverview {
            last_sync,
            records_transferred: movement_stats.records_transferred,
            success_rate: movement_stats.success_rate,
        },
        calls: CallOverview {
            total_today,
            completed_today,
            average_duration: duration::format(call_stats.average_completed_duration()),
        },
    })
}
