//! Core traits for the filtering pipeline.
//!
//! This module defines the RowFilter trait that allows composable
//! predicates to be applied to the base table.

use data_loader::MovieRow;

/// Core trait for filtering base-table rows.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` lets the pipeline evaluate a filter from rayon workers
/// - Filters only look at a row; they never own or modify it
pub trait RowFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `row` passes this filter
    fn keep(&self, row: &MovieRow) -> bool;
}
