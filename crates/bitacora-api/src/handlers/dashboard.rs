//! Dashboard handlers
//!
//! Headline metrics for the landing page.

use crate::dto::{ApiResponse, DashboardParams};
use actix_web::{
    web::{self, Data, Json, Query},
    Result,
};
use bitacora_services::{overview, DashboardOverview, SnapshotStore};
use tracing::{info, instrument};

/// Get the dashboard overview
///
/// # Examples
///
/// ```text
/// GET /api/v1/dashboard?today=2024-01-22
/// ```
#[instrument(skip(store))]
pub async fn get_overview(
    query: Query<DashboardParams>,
    store: Data<SnapshotStore>,
) -> Result<Json<ApiResponse<DashboardOverview>>> {
    let today = query.reference_day()?;
    let snapshot = store.current();
    let result = overview(&snapshot, today)?;

    info!(
        "Dashboard overview for {}: calls_today={}, success_rate={}%",
        result.date, result.calls.total_today, result.sync.success_rate
    );

    Ok(Json(ApiResponse::success(result)))
}

/// Configure dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(get_overview));
}
