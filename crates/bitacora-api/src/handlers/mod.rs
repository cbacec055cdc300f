//! HTTP request handlers

pub mod calls;
pub mod dashboard;
mod export;
pub mod movements;
pub mod snapshot;
pub mod status;

pub use calls::configure as configure_calls;
pub use dashboard::configure as configure_dashboard;
pub use movements::configure as configure_movements;
pub use snapshot::configure as configure_snapshot;
pub use status::configure as configure_status;
