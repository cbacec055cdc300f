//! `HH:MM:SS` duration codec
//!
//! Talk times travel as text. Hours are unbounded so cumulative call-center
//! totals can exceed a clock day.

use crate::{AppError, AppResult};

/// Parse an `HH:MM:SS` string into whole seconds.
///
/// Each component must be one or more ASCII digits. Minutes and seconds are
/// not range checked.
///
/// # Errors
///
/// Returns `AppError::MalformedDuration` if the text does not have exactly
/// three numeric components or the total overflows `u64`.
pub fn parse(text: &str) -> AppResult<u64> {
    let malformed = || AppError::MalformedDuration(text.to_string());

    let mut parts = text.split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let hours = parse_component(h).ok_or_else(malformed)?;
    let minutes = parse_component(m).ok_or_else(malformed)?;
    let seconds = parse_component(s).ok_or_else(malformed)?;

    hours
        .checked_mul(3600)
        .and_then(|total| total.checked_add(minutes.checked_mul(60)?))
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(malformed)
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Render whole seconds as `HH:MM:SS`.
///
/// Hours are zero-padded to two digits but never truncated: 123 hours renders
/// as `123:00:00`.
pub fn format(seconds: u64) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
