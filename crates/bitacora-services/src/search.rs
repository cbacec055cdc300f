//! Record search
//!
//! Each record kind declares which of its fields are searchable and how they
//! match; one generic filter consumes that declaration.

use bitacora_core::models::{CallRecord, MovementRecord};
use tracing::debug;

/// How a field is compared against the search term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Lowercased term is a substring of the lowercased field
    CaseInsensitive,
    /// Raw term is a substring of the raw field
    Exact,
}

/// One searchable field of a record kind
pub struct SearchField<T> {
    /// Field name, for diagnostics
    pub name: &'static str,
    /// Field accessor
    pub get: fn(&T) -> &str,
    /// Comparison mode
    pub mode: MatchMode,
}

/// Record kinds that can be searched from the log pages
pub trait Searchable: Sized + 'static {
    /// Fields the search box looks at
    const FIELDS: &'static [SearchField<Self>];
}

impl Searchable for MovementRecord {
    const FIELDS: &'static [SearchField<Self>] = &[
        SearchField {
            name: "operation",
            get: |m| m.operation.as_str(),
            mode: MatchMode::CaseInsensitive,
        },
        SearchField {
            name: "source",
            get: |m| m.source.as_str(),
            mode: MatchMode::CaseInsensitive,
        },
        SearchField {
            name: "destination",
            get: |m| m.destination.as_str(),
            mode: MatchMode::CaseInsensitive,
        },
    ];
}

impl Searchable for CallRecord {
    // Phone numbers have no case
    const FIELDS: &'static [SearchField<Self>] = &[
        SearchField {
            name: "phoneNumber",
            get: |c| c.phone_number.as_str(),
            mode: MatchMode::Exact,
        },
        SearchField {
            name: "agent",
            get: |c| c.agent.as_str(),
            mode: MatchMode::CaseInsensitive,
        },
        SearchField {
            name: "callId",
            get: |c| c.call_id.as_str(),
            mode: MatchMode::CaseInsensitive,
        },
    ];
}

/// Prepared search term
struct Needle<'t> {
    raw: &'t str,
    lower: String,
}

impl<'t> Needle<'t> {
    fn new(raw: &'t str) -> Self {
        Self {
            raw,
            lower: raw.to_lowercase(),
        }
    }

    fn matches<T>(&self, field: &SearchField<T>, record: &T) -> bool {
        let value = (field.get)(record);
        match field.mode {
            MatchMode::Exact => value.contains(self.raw),
            MatchMode::CaseInsensitive => value.to_lowercase().contains(&self.lower),
        }
    }
}

/// Check a single record against a search term
///
/// An empty or whitespace-only term matches everything.
pub fn matches<T: Searchable>(record: &T, term: &str) -> bool {
    if term.trim().is_empty() {
        return true;
    }
    let needle = Needle::new(term);
    T::FIELDS.iter().any(|field| needle.matches(field, record))
}

/// Filter records by search term
///
/// Returns the matching records in their original relative order. An empty
/// or whitespace-only term returns every record.
pub fn filter<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    if term.trim().is_empty() {
        return records.iter().collect();
    }

    let needle = Needle::new(term);
    let matched: Vec<&T> = records
        .iter()
        .filter(|record| T::FIELDS.iter().any(|field| needle.matches(field, *record)))
        .collect();

    debug!(
        term,
        total = records.len(),
        matched = matched.len(),
        "Filtered records"
    );

    matched
}
