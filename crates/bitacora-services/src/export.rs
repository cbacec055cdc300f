//! Record export
//!
//! Renders a (usually filtered) record view as CSV, JSON or JSON Lines for
//! the "Exportar" action. Output is produced in chunks of
//! `EXPORT_BATCH_SIZE` rows so the API layer can stream it.

use crate::constants::EXPORT_BATCH_SIZE;
use bitacora_core::models::{CallRecord, MovementRecord};
use bitacora_core::{AppResult, RecordStatus};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, instrument};

/// Export format
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// CSV format
    #[default]
    Csv,
    /// JSON format (array of objects)
    Json,
    /// JSON Lines format (one object per line)
    Jsonl,
}

impl ExportFormat {
    /// Get content type header value
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json; charset=utf-8",
            Self::Jsonl => "application/x-ndjson; charset=utf-8",
        }
    }

    /// Get file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Jsonl => "jsonl",
        }
    }
}

/// Flat export row
pub trait ExportRow: Serialize {
    /// CSV header line, without the trailing newline
    const CSV_HEADER: &'static str;

    /// Field values in header order
    fn csv_fields(&self) -> Vec<&str>;
}

/// Records that can be exported
pub trait Exportable {
    type Row: ExportRow;

    fn export_row(&self) -> Self::Row;
}

/// Movement export row
#[derive(Debug, Clone, Serialize)]
pub struct MovementExportRow {
    pub id: String,
    pub timestamp: String,
    pub operation: String,
    pub records_count: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub source: String,
    pub destination: String,
    pub error_message: String,
}

impl ExportRow for MovementExportRow {
    const CSV_HEADER: &'static str =
        "id,timestamp,operation,records_count,status,status_label,source,destination,error_message";

    fn csv_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.timestamp.as_str(),
            self.operation.as_str(),
            self.records_count.as_str(),
            self.status,
            self.status_label,
            self.source.as_str(),
            self.destination.as_str(),
            self.error_message.as_str(),
        ]
    }
}

impl Exportable for MovementRecord {
    type Row = MovementExportRow;

    fn export_row(&self) -> MovementExportRow {
        MovementExportRow {
            id: self.id.clone(),
            timestamp: self.display_timestamp(),
            operation: self.operation.clone(),
            records_count: self.records_count.to_string(),
            status: self.status.code(),
            status_label: self.status.label(),
            source: self.source.clone(),
            destination: self.destination.clone(),
            error_message: self.error_message.clone().unwrap_or_default(),
        }
    }
}

/// Call export row
#[derive(Debug, Clone, Serialize)]
pub struct CallExportRow {
    pub id: String,
    pub call_id: String,
    pub timestamp: String,
    pub phone_number: String,
    pub direction: &'static str,
    pub direction_label: &'static str,
    pub duration: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub agent: String,
    pub recording: String,
}

impl ExportRow for CallExportRow {
    const CSV_HEADER: &'static str = "id,call_id,timestamp,phone_number,direction,direction_label,duration,status,status_label,agent,recording";

    fn csv_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.call_id.as_str(),
            self.timestamp.as_str(),
            self.phone_number.as_str(),
            self.direction,
            self.direction_label,
            self.duration.as_str(),
            self.status,
            self.status_label,
            self.agent.as_str(),
            self.recording.as_str(),
        ]
    }
}

impl Exportable for CallRecord {
    type Row = CallExportRow;

    fn export_row(&self) -> CallExportRow {
        CallExportRow {
            id: self.id.clone(),
            call_id: self.call_id.clone(),
            timestamp: self.display_timestamp(),
            phone_number: self.phone_number.clone(),
            direction: self.direction.as_str(),
            direction_label: self.direction.label(),
            duration: self.duration.clone(),
            status: self.status.code(),
            status_label: self.status.label(),
            agent: self.agent.clone(),
            recording: self.recording.clone().unwrap_or_default(),
        }
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn write_csv_row<R: ExportRow>(out: &mut String, row: &R) {
    let line = row
        .csv_fields()
        .into_iter()
        .map(csv_field)
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push('\n');
}

/// Render records in chunks of `EXPORT_BATCH_SIZE` rows
///
/// Concatenating the chunks yields the complete document. There is always
/// at least one chunk (the CSV header, or `[]` for an empty JSON export).
///
/// # Errors
///
/// Returns `AppError::Serialization` if a row fails to encode.
#[instrument(skip(records))]
pub fn export_chunks<'a, T>(records: &[&'a T], format: ExportFormat) -> AppResult<Vec<String>>
where
    T: Exportable + 'a,
{
    let mut chunks = Vec::with_capacity(records.len() / EXPORT_BATCH_SIZE + 1);

    match format {
        ExportFormat::Csv => {
            let mut header = String::from(T::Row::CSV_HEADER);
            header.push('\n');
            chunks.push(header);

            for batch in records.chunks(EXPORT_BATCH_SIZE) {
                let mut out = String::new();
                for record in batch {
                    write_csv_row(&mut out, &record.export_row());
                }
                chunks.push(out);
            }
        }
        ExportFormat::Json => {
            if records.is_empty() {
                chunks.push("[]".to_string());
            }
            let batches = records.len().div_ceil(EXPORT_BATCH_SIZE);
            for (index, batch) in records.chunks(EXPORT_BATCH_SIZE).enumerate() {
                let mut out = String::new();
                out.push(if index == 0 { '[' } else { ',' });
                for (i, record) in batch.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&serde_json::to_string(&record.export_row())?);
                }
                if index + 1 == batches {
                    out.push(']');
                }
                chunks.push(out);
            }
        }
        ExportFormat::Jsonl => {
            for batch in records.chunks(EXPORT_BATCH_SIZE) {
                let mut out = String::new();
                for record in batch {
                    out.push_str(&serde_json::to_string(&record.export_row())?);
                    out.push('\n');
                }
                chunks.push(out);
            }
        }
    }

    debug!(rows = records.len(), chunks = chunks.len(), "Rendered export");

    Ok(chunks)
}

/// Render records as one complete document
///
/// # Errors
///
/// Returns `AppError::Serialization` if a row fails to encode.
pub fn export<'a, T>(records: &[&'a T], format: ExportFormat) -> AppResult<String>
where
    T: Exportable + 'a,
{
    Ok(export_chunks(records, format)?.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitacora_core::models::{timestamp, CallDirection, CallStatus, MovementStatus};

    fn failed_movement() -> MovementRecord {
        MovementRecord {
            id: "3".to_string(),
            timestamp: timestamp::parse("2024-01-22 10:45:33").unwrap(),
            operation: "Migración de Servicios".to_string(),
            records_count: 0,
            status: MovementStatus::Error,
            source: "Mikrowisp DB".to_string(),
            destination: "GHL CRM".to_string(),
            error_message: Some("Timeout, reintentar \"más tarde\"".to_string()),
        }
    }

    fn call(id: usize) -> CallRecord {
        CallRecord {
            id: id.to_string(),
            timestamp: timestamp::parse("2024-01-22 16:45:30").unwrap(),
            phone_number: "+1234567890".to_string(),
            duration: "00:05:23".to_string(),
            direction: CallDirection::Inbound,
            status: CallStatus::Completed,
            agent: "Ana García".to_string(),
            call_id: format!("RBN-2024-{:03}", id),
            recording: Some("recording_001.mp3".to_string()),
        }
    }

    #[test]
    fn test_export_format() {
        assert_eq!(ExportFormat::default(), ExportFormat::Csv);
        assert_eq!(ExportFormat::Csv.content_type(), "text/csv; charset=utf-8");
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(
            ExportFormat::Jsonl.content_type(),
            "application/x-ndjson; charset=utf-8"
        );
    }

    #[test]
    fn test_csv_escapes_fields() {
        let movement = failed_movement();
        let csv = export(&[&movement], ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], MovementExportRow::CSV_HEADER);
        assert_eq!(
            lines[1],
            "3,2024-01-22 10:45:33,Migración de Servicios,0,error,Error,Mikrowisp DB,GHL CRM,\"Timeout, reintentar \"\"más tarde\"\"\""
        );
    }

    #[test]
    fn test_call_row_labels() {
        let record = call(1);
        let row = record.export_row();
        assert_eq!(row.direction_label, "Entrante");
        assert_eq!(row.status_label, "Completada");
        assert_eq!(row.recording, "recording_001.mp3");
    }

    #[test]
    fn test_json_array() {
        let calls: Vec<CallRecord> = (1..=3).map(call).collect();
        let refs: Vec<&CallRecord> = calls.iter().collect();
        let json = export(&refs, ExportFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2]["call_id"], "RBN-2024-003");
    }

    #[test]
    fn test_json_empty() {
        let refs: Vec<&CallRecord> = Vec::new();
        assert_eq!(export(&refs, ExportFormat::Json).unwrap(), "[]");
        assert_eq!(
            export(&refs, ExportFormat::Csv).unwrap(),
            format!("{}\n", CallExportRow::CSV_HEADER)
        );
        assert_eq!(export(&refs, ExportFormat::Jsonl).unwrap(), "");
    }

    #[test]
    fn test_json_spans_batches() {
        let calls: Vec<CallRecord> = (0..EXPORT_BATCH_SIZE + 5).map(call).collect();
        let refs: Vec<&CallRecord> = calls.iter().collect();

        let chunks = export_chunks(&refs, ExportFormat::Json).unwrap();
        assert_eq!(chunks.len(), 2);

        let value: serde_json::Value = serde_json::from_str(&chunks.concat()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), EXPORT_BATCH_SIZE + 5);
    }

    #[test]
    fn test_jsonl_one_object_per_line() {
        let calls: Vec<CallRecord> = (1..=2).map(call).collect();
        let refs: Vec<&CallRecord> = calls.iter().collect();
        let jsonl = export(&refs, ExportFormat::Jsonl).unwrap();

        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["status"], "completed");
        }
    }

    #[test]
    fn test_jsonl_chunks_end_on_line_boundaries() {
        let calls: Vec<CallRecord> = (1..=EXPORT_BATCH_SIZE + 1).map(call).collect();
        let refs: Vec<&CallRecord> = calls.iter().collect();
        let chunks = export_chunks(&refs, ExportFormat::Jsonl).unwrap();

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|chunk| chunk.ends_with('\n')));
        assert_eq!(chunks[1].lines().count(), 1);

        let last: serde_json::Value = serde_json::from_str(chunks[1].trim_end()).unwrap();
        assert_eq!(last["id"], (EXPORT_BATCH_SIZE + 1).to_string());
    }
}
