//! Query and response DTOs shared by the movement and call logs

use bitacora_core::traits::{PaginatedResponse, Pagination};
use bitacora_core::AppError;
use bitacora_services::ExportFormat;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Log page query parameters
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "first_page")]
    #[validate(range(min = 1, max = 100000))]
    pub page: usize,

    /// Records per page
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 1000))]
    pub per_page: usize,

    /// Free-text search term (empty shows everything)
    #[serde(default)]
    pub search: String,
}

fn first_page() -> usize {
    1
}

fn default_per_page() -> usize {
    50
}

impl Default for LogQueryParams {
    fn default() -> Self {
        Self {
            page: first_page(),
            per_page: default_per_page(),
            search: String::new(),
        }
    }
}

impl LogQueryParams {
    /// Page window over the filtered view
    pub fn window(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

/// Log export parameters
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogExportParams {
    /// Free-text search term applied before export
    #[serde(default)]
    pub search: String,

    /// Export format
    #[serde(default)]
    pub format: ExportFormat,
}

/// Reject search terms longer than `max_len` characters
pub fn check_search_term(term: &str, max_len: usize) -> Result<(), AppError> {
    let len = term.chars().count();
    if len > max_len {
        return Err(AppError::Validation(format!(
            "search term is {} characters long (max {})",
            len, max_len
        )));
    }
    Ok(())
}

/// One page of a log: filtered records plus full-store summary cards
#[derive(Debug, Clone, Serialize)]
pub struct LogPage<R, S> {
    /// Records on this page and pagination over the filtered view
    #[serde(flatten)]
    pub page: PaginatedResponse<R>,

    /// Search term that produced the view
    pub search: String,

    /// Statistics over the unfiltered store
    pub stats: S,
}
