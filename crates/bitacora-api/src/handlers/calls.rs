//! Call log handlers
//!
//! The telephony log for the RingByName integration: every call with its
//! agent, duration, and recording.

use super::export::attachment;
use crate::dto::{
    check_search_term, ApiResponse, CallResponse, CallStatsResponse, LogExportParams, LogPage,
    LogQueryParams,
};
use actix_web::{
    web::{self, Data, Json, Query},
    HttpResponse, Result,
};
use bitacora_core::config::SearchConfig;
use bitacora_core::AppError;
use bitacora_services::{filter, summarize, LogView, SnapshotStore};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// List calls matching a search term
///
/// The phone number is matched exactly as typed; agent and call id ignore
/// case.
///
/// # Errors
///
/// Returns 400 if the query is invalid, or 422 if a completed call in the
/// snapshot carries a malformed duration.
///
/// # Examples
///
/// ```text
/// GET /api/v1/calls?search=%2B1234&page=1&per_page=50
/// ```
#[instrument(skip(store, search_config, query))]
pub async fn list_calls(
    query: Query<LogQueryParams>,
    store: Data<SnapshotStore>,
    search_config: Data<SearchConfig>,
) -> Result<Json<LogPage<CallResponse, CallStatsResponse>>> {
    query.validate().map_err(|e| {
        warn!("Invalid query parameters: {}", e);
        AppError::Validation(e.to_string())
    })?;
    check_search_term(&query.search, search_config.max_term_length)?;

    let snapshot = store.current();
    let view = LogView::compute(&snapshot.calls, &query.search)?;

    debug!(
        "Listing calls: search={:?}, page={}, per_page={}",
        query.search, query.page, query.per_page
    );

    let total = view.matched();
    let data: Vec<CallResponse> = query
        .window()
        .apply(&view.records)
        .iter()
        .map(|call| CallResponse::from(*call))
        .collect();

    info!("Retrieved {} calls out of {} matching", data.len(), total);

    Ok(Json(LogPage {
        page: query.window().respond(data, total),
        search: view.term,
        stats: CallStatsResponse::from(view.stats),
    }))
}

/// Call summary cards over the full store
///
/// # Errors
///
/// Returns 422 if a completed call carries a malformed duration.
#[instrument(skip(store))]
pub async fn get_call_stats(store: Data<SnapshotStore>) -> Result<Json<ApiResponse<CallStatsResponse>>> {
    let snapshot = store.current();
    let stats = summarize(&snapshot.calls)?;

    info!(
        "Calculated call stats: total={}, completed={}, talk_time={}s",
        stats.total, stats.completed_count, stats.total_completed_duration
    );

    Ok(Json(ApiResponse::success(CallStatsResponse::from(stats))))
}

/// Export calls matching a search term
///
/// # Examples
///
/// ```text
/// GET /api/v1/calls/export?format=jsonl&search=sistema
/// ```
#[instrument(skip(store, search_config, query))]
pub async fn export_calls(
    query: Query<LogExportParams>,
    store: Data<SnapshotStore>,
    search_config: Data<SearchConfig>,
) -> Result<HttpResponse> {
    check_search_term(&query.search, search_config.max_term_length)?;

    let snapshot = store.current();
    let records = filter(snapshot.calls.as_slice(), &query.search);

    Ok(attachment("calls", &records, query.format)?)
}

/// Configure call routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/calls")
            .route("", web::get().to(list_calls))
            .route("/stats", web::get().to(get_call_stats))
            .route("/export", web::get().to(export_calls)),
    );
}
