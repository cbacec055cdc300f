//! Common traits and pagination types
//!
//! Defines the record source boundary and the pagination wrappers shared by
//! the list endpoints.

use crate::models::{CallRecord, MovementRecord};
use crate::AppResult;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Records that carry a point in time
pub trait Timestamped {
    fn timestamp(&self) -> NaiveDateTime;
}

impl Timestamped for MovementRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

impl Timestamped for CallRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Records with invariants checked when a store is built
pub trait CheckedRecord {
    fn check(&self) -> AppResult<()>;
}

impl CheckedRecord for MovementRecord {
    fn check(&self) -> AppResult<()> {
        self.validate()
    }
}

impl CheckedRecord for CallRecord {
    fn check(&self) -> AppResult<()> {
        Ok(())
    }
}

/// An already-materialized, ordered sequence of records
///
/// This is the boundary with the producing system. Every core computation
/// reads records through it, so callers can hand in a `Vec`, a slice or a
/// `RecordStore` alike.
pub trait RecordSource<T> {
    /// Records in producer order
    fn records(&self) -> &[T];
}

impl<T> RecordSource<T> for [T] {
    fn records(&self) -> &[T] {
        self
    }
}

impl<T> RecordSource<T> for Vec<T> {
    fn records(&self) -> &[T] {
        self.as_slice()
    }
}

/// Largest page size a log page serves
pub const MAX_PER_PAGE: usize = 1000;

/// Page window over an in-memory view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Index of the first record on the page; saturates for pages far past the end
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Slice out the current page, preserving order
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.per_page).min(items.len());
        &items[start..end]
    }

    /// Wrap a page of records with metadata over `total` matches
    pub fn respond<T>(&self, data: Vec<T>, total: usize) -> PaginatedResponse<T> {
        PaginatedResponse {
            data,
            pagination: PaginationMeta::new(total, self.page, self.per_page),
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl PaginationMeta {
    pub fn new(total: usize, page: usize, per_page: usize) -> Self {
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page)
        } else {
            0
        };

        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}
