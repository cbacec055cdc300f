//! Streaming export responses

use actix_web::{web::Bytes, HttpResponse};
use bitacora_core::AppResult;
use bitacora_services::export::{export_chunks, Exportable};
use bitacora_services::ExportFormat;
use chrono::Utc;
use futures::stream;
use tracing::info;

/// Stream an export of `records` as a file attachment
///
/// The document is rendered in batches up front so encoding errors surface
/// as a proper error response instead of a truncated download.
pub(crate) fn attachment<T: Exportable>(
    name: &str,
    records: &[&T],
    format: ExportFormat,
) -> AppResult<HttpResponse> {
    let chunks = export_chunks(records, format)?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("{}_export_{}.{}", name, timestamp, format.extension());

    info!(
        "Exporting {} {} records as {:?} to {}",
        records.len(),
        name,
        format,
        filename
    );

    let body = stream::iter(
        chunks
            .into_iter()
            .map(|chunk| Ok::<_, actix_web::Error>(Bytes::from(chunk))),
    );

    Ok(HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .streaming(body))
}
