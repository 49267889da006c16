//! The FilteredView: the shared intermediate result every panel reads.

use data_loader::{BaseTable, MovieRow};
use std::sync::Arc;

/// A read-only subset of the base table.
///
/// Holds the base table plus the positions of the selected rows, so
/// cloning a view is cheap and never copies rows. Views are recomputed,
/// never modified.
#[derive(Debug, Clone)]
pub struct FilteredView {
    base: Arc<BaseTable>,
    positions: Arc<[usize]>,
}

impl FilteredView {
    /// A view over every row of `base`
    pub fn unfiltered(base: Arc<BaseTable>) -> Self {
        let positions: Vec<usize> = (0..base.len()).collect();
        Self::from_positions(base, positions)
    }

    /// A view with no rows
    pub fn empty(base: Arc<BaseTable>) -> Self {
        Self::from_positions(base, Vec::new())
    }

    pub(crate) fn from_positions(base: Arc<BaseTable>, positions: Vec<usize>) -> Self {
        debug_assert!(positions.iter().all(|&p| p < base.len()));
        Self {
            base,
            positions: positions.into(),
        }
    }

    /// Iterate the selected rows in base-table order
    pub fn rows(&self) -> impl Iterator<Item = &MovieRow> + '_ {
        let rows = self.base.rows();
        self.positions.iter().map(move |&p| &rows[p])
    }

    /// Positions of the selected rows in the base table
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn base(&self) -> &Arc<BaseTable> {
        &self.base
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
