//! Bitacora Core Library
//!
//! This crate provides the foundational types and pure functions for the
//! operational event log. It includes:
//!
//! - Domain models (MovementRecord, CallRecord, Snapshot)
//! - The immutable record store
//! - Status classification into labels and severity tiers
//! - The `HH:MM:SS` duration codec
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod duration;
pub mod error;
pub mod models;
pub mod status;
pub mod store;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;
pub use status::{classify, RecordKind, RecordStatus, Severity, StatusBadge};
pub use store::{RecordStore, Snapshot};

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
