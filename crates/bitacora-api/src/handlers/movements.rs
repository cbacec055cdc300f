//! Movement log handlers
//!
//! The synchronization log: every data movement between the billing system
//! and the CRM, with summary cards and export.

use super::export::attachment;
use crate::dto::{
    check_search_term, ApiResponse, LogExportParams, LogPage, LogQueryParams, MovementResponse,
};
use actix_web::{
    web::{self, Data, Json, Query},
    HttpResponse, Result,
};
use bitacora_core::config::SearchConfig;
use bitacora_core::AppError;
use bitacora_services::{filter, summarize, LogView, MovementStats, SnapshotStore};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// List movements matching a search term
///
/// # Errors
///
/// Returns 400 if the query is invalid.
///
/// # Examples
///
/// ```text
/// GET /api/v1/movements?search=facturas&page=1&per_page=50
/// ```
#[instrument(skip(store, search_config, query))]
pub async fn list_movements(
    query: Query<LogQueryParams>,
    store: Data<SnapshotStore>,
    search_config: Data<SearchConfig>,
) -> Result<Json<LogPage<MovementResponse, MovementStats>>> {
    query.validate().map_err(|e| {
        warn!("Invalid query parameters: {}", e);
        AppError::Validation(e.to_string())
    })?;
    check_search_term(&query.search, search_config.max_term_length)?;

    let snapshot = store.current();
    let view = LogView::compute(&snapshot.movements, &query.search)?;

    debug!(
        "Listing movements: search={:?}, page={}, per_page={}",
        query.search, query.page, query.per_page
    );

    let total = view.matched();
    let data: Vec<MovementResponse> = query
        .window()
        .apply(&view.records)
        .iter()
        .map(|movement| MovementResponse::from(*movement))
        .collect();

    info!(
        "Retrieved {} movements out of {} matching",
        data.len(),
        total
    );

    Ok(Json(LogPage {
        page: query.window().respond(data, total),
        search: view.term,
        stats: view.stats,
    }))
}

/// Movement summary cards over the full store
///
/// # Examples
///
/// ```text
/// GET /api/v1/movements/stats
/// ```
#[instrument(skip(store))]
pub async fn get_movement_stats(
    store: Data<SnapshotStore>,
) -> Result<Json<ApiResponse<MovementStats>>> {
    let snapshot = store.current();
    let stats = summarize(&snapshot.movements)?;

    info!(
        "Calculated movement stats: total={}, success_rate={}%",
        stats.total, stats.success_rate
    );

    Ok(Json(ApiResponse::success(stats)))
}

/// Export movements matching a search term
///
/// # Examples
///
/// ```text
/// GET /api/v1/movements/export?format=csv&search=GHL
/// ```
#[instrument(skip(store, search_config, query))]
pub async fn export_movements(
    query: Query<LogExportParams>,
    store: Data<SnapshotStore>,
    search_config: Data<SearchConfig>,
) -> Result<HttpResponse> {
    check_search_term(&query.search, search_config.max_term_length)?;

    let snapshot = store.current();
    let records = filter(snapshot.movements.as_slice(), &query.search);

    Ok(attachment("movements", &records, query.format)?)
}

/// Configure movement routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/movements")
            .route("", web::get().to(list_movements))
            .route("/stats", web::get().to(get_movement_stats))
            .route("/export", web::get().to(export_movements)),
    );
}
