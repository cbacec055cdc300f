//! Log services for Bitacora
//!
//! This crate holds the derivations the dashboard recomputes every time the
//! snapshot or the search term changes, plus the pieces that hand snapshots
//! over from the producing systems.
//!
//! # Architecture
//!
//! Every derivation is a pure function over an immutable snapshot:
//! - Filtering never reorders or mutates the store
//! - Summary cards are always computed on the full store
//! - Errors surface as `AppError`, never as silently zeroed totals
//!
//! # Services
//!
//! - `search` - Declarative per-kind substring search
//! - `aggregator` - Summary statistics for both record streams
//! - `log_view` - Filtered table plus full-store stats for one page
//! - `overview` - Cross-stream dashboard headline metrics
//! - `export` - CSV / JSON / JSON Lines rendering
//! - `snapshot` - Atomically swappable current snapshot
//! - `source` - JSON file record source

pub mod aggregator;
pub mod export;
pub mod log_view;
pub mod overview;
pub mod search;
pub mod snapshot;
pub mod source;

pub use aggregator::{summarize, Aggregate, CallStats, MovementStats};
pub use export::{export, ExportFormat};
pub use log_view::LogView;
pub use overview::{overview, DashboardOverview};
pub use search::{filter, MatchMode, SearchField, Searchable};
pub use snapshot::SnapshotStore;
pub use source::JsonFileSource;

/// Business logic constants
pub mod constants {
    /// Decimal places kept in percentage figures
    pub const PERCENT_SCALE: u32 = 1;

    /// Rows rendered per export chunk
    pub const EXPORT_BATCH_SIZE: usize = 1000;
}
