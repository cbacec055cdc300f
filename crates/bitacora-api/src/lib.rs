//! API layer for Bitacora
//!
//! HTTP handlers exposing the movement and call logs, their summary cards,
//! exports, the dashboard overview, and snapshot reloads.

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::{ApiResponse, LogQueryParams};

// Re-export handler configuration functions
pub use handlers::{
    configure_calls, configure_dashboard, configure_movements, configure_snapshot,
    configure_status,
};
