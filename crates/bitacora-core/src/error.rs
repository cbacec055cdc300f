//! Unified error handling for Bitacora
//!
//! This module provides the error type shared by every crate in the
//! workspace, with automatic HTTP response mapping for the API layer.

use crate::status::RecordKind;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Data Contract Errors ====================
    #[error("Malformed duration: {0:?} (expected HH:MM:SS)")]
    MalformedDuration(String),

    #[error("Unknown {kind} status: {status:?}")]
    UnknownStatus { kind: RecordKind, status: String },

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Snapshot unavailable: {0}")]
    SnapshotLoad(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 422 Unprocessable Entity: the upstream producer broke the record contract
            AppError::MalformedDuration(_) | AppError::UnknownStatus { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 503 Service Unavailable
            AppError::SnapshotLoad(_) => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            AppError::Internal(_) | AppError::Config(_) | AppError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MalformedDuration(_) => "malformed_duration",
            AppError::UnknownStatus { .. } => "unknown_status",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::SnapshotLoad(_) => "snapshot_unavailable",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
