//! Log page view
//!
//! Bundles what one log page renders: the detail table filtered by the
//! search term, and the summary cards over the full store.

use crate::aggregator::{summarize, Aggregate};
use crate::search::{filter, Searchable};
use bitacora_core::traits::RecordSource;
use bitacora_core::AppResult;
use tracing::instrument;

/// Filtered records plus full-store statistics
#[derive(Debug)]
pub struct LogView<'a, T: Aggregate> {
    /// Search term that produced `records`
    pub term: String,

    /// Records matching the term, in store order
    pub records: Vec<&'a T>,

    /// Statistics over the unfiltered store
    pub stats: T::Stats,
}

impl<'a, T> LogView<'a, T>
where
    T: Aggregate + Searchable,
{
    /// Recompute the view for a snapshot and search term
    ///
    /// # Errors
    ///
    /// Propagates aggregation errors; the filtered table is not returned on
    /// its own when the summary cannot be computed.
    #[instrument(skip(source), fields(kind = std::any::type_name::<T>()))]
    pub fn compute<S>(source: &'a S, term: &str) -> AppResult<Self>
    where
        S: RecordSource<T> + ?Sized,
    {
        let stats = summarize(source)?;
        let records = filter(source.records(), term);

        Ok(Self {
            term: term.to_string(),
            records,
            stats,
        })
    }

    /// Number of records in the filtered table
    pub fn matched(&self) -> usize {
        self.records.len()
    }
}
