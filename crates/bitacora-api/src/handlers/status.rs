//! Status classification handlers

use crate::dto::{ApiResponse, StatusResponse};
use actix_web::{
    web::{self, Json, Path},
    Result,
};
use bitacora_core::{classify, AppError, RecordKind};
use tracing::{debug, instrument};

/// Classify a raw status code into its label and tier
///
/// # Errors
///
/// Returns 404 for an unknown record kind, or 422 for a code outside the
/// kind's closed set.
///
/// # Examples
///
/// ```text
/// GET /api/v1/status/call/busy
/// ```
#[instrument]
pub async fn get_status(path: Path<(String, String)>) -> Result<Json<ApiResponse<StatusResponse>>> {
    let (kind, code) = path.into_inner();

    let kind = RecordKind::from_str(&kind)
        .ok_or_else(|| AppError::NotFound(format!("Unknown record kind: {}", kind)))?;
    let badge = classify(kind, &code)?;

    debug!("Classified {} status {:?} as {}", kind, code, badge.label);

    Ok(Json(ApiResponse::success(StatusResponse::new(kind, code, badge))))
}

/// Configure status routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/status/{kind}/{code}", web::get().to(get_status));
}
