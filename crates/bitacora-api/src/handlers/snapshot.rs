//! Snapshot handlers

use crate::dto::{ApiResponse, SnapshotInfo};
use actix_web::{
    web::{self, Data, Json},
    Result,
};
use bitacora_services::{JsonFileSource, SnapshotStore};
use tracing::{error, info, instrument};

/// Re-read the snapshot files and publish the result
///
/// The current snapshot stays in effect if loading fails.
///
/// # Errors
///
/// Returns 503 if a file cannot be read, 500 if a file cannot be decoded, or
/// 400 if a record breaks its invariants.
#[instrument(skip(source, store))]
pub async fn reload_snapshot(
    source: Data<JsonFileSource>,
    store: Data<SnapshotStore>,
) -> Result<Json<ApiResponse<SnapshotInfo>>> {
    let snapshot = source.load_snapshot().await.map_err(|e| {
        error!("Snapshot reload failed, keeping current snapshot: {}", e);
        e
    })?;

    let info = SnapshotInfo::from(&snapshot);
    store.replace(snapshot);

    info!(
        "Snapshot reloaded: movements={}, calls={}",
        info.movements, info.calls
    );

    Ok(Json(ApiResponse::success(info).with_message("Snapshot reloaded")))
}

/// Configure snapshot routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/snapshot/reload", web::post().to(reload_snapshot));
}
