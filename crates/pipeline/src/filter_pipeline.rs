//! The FilterPipeline chains row filters over the base table.
//!
//! This module provides the FilterPipeline struct that applies multiple
//! filters in sequence using the builder pattern, and `filter()`, the
//! FilterEngine entry point that builds the standard three-filter pipeline
//! from a FilterState.

use crate::filters::{GenreFilter, RegionFilter, YearRangeFilter};
use crate::state::FilterState;
use crate::traits::RowFilter;
use crate::view::FilteredView;
use data_loader::BaseTable;
use rayon::prelude::*;
use std::sync::Arc;

/// Chains multiple row filters together.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreFilter::new(genres))
///     .add_filter(YearRangeFilter::new(YearRange::new(2015, 2016)));
///
/// let view = pipeline.apply(&base);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn RowFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl RowFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the base table.
    ///
    /// Each filter scans only the positions the previous one kept. The scan
    /// runs on rayon; collecting an indexed parallel iterator keeps the
    /// base-table order. Stops early once nothing is left.
    pub fn apply(&self, base: &Arc<BaseTable>) -> FilteredView {
        let rows = base.rows();
        let mut current: Vec<usize> = (0..rows.len()).collect();

        for filter in &self.filters {
            if current.is_empty() {
                break;
            }
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = current
                .into_par_iter()
                .filter(|&p| filter.keep(&rows[p]))
                .collect();
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }

        FilteredView::from_positions(Arc::clone(base), current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the three active filter predicates to the base table.
///
/// A row is kept iff its genre is selected, its region name is selected
/// and its year lies in the inclusive range. An empty genre or region
/// selection, or an inverted year range, gives an empty view rather than an
/// error. `base` is only read, so concurrent calls with different states
/// are safe.
pub fn filter(base: &Arc<BaseTable>, state: &FilterState) -> FilteredView {
    if state.selects_nothing() {
        tracing::debug!("Filter state selects nothing; returning empty view");
        return FilteredView::empty(Arc::clone(base));
    }

    FilterPipeline::new()
        .add_filter(GenreFilter::new(state.genres.clone()))
        .add_filter(RegionFilter::new(state.regions.clone()))
        .add_filter(YearRangeFilter::new(state.year_range))
        .apply(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::YearRange;
    use data_loader::MovieRow;

    fn row(title: &str, genre: &str, year: u16, region: &str) -> MovieRow {
        MovieRow {
            title: title.to_string(),
            actor_name: "Ann Lee".to_string(),
            genre: genre.to_string(),
            start_year: year,
            runtime_minutes: Some(100.0),
            average_rating: 7.0,
            region_code: "XX".to_string(),
            region_name: region.to_string(),
        }
    }

    fn base() -> Arc<BaseTable> {
        Arc::new(BaseTable::from_rows(vec![
            row("A", "Action", 2014, "India"),
            row("B", "Drama", 2015, "India"),
            row("C", "Action", 2015, "Canada"),
            row("D", "Action", 2016, "India"),
        ]))
    }

    #[test]
    fn test_empty_pipeline_keeps_everything() {
        let base = base();
        let view = FilterPipeline::new().apply(&base);
        assert_eq!(view.len(), 4);
        assert_eq!(view.positions(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_single_filter() {
        let base = base();
        let view = FilterPipeline::new()
            .add_filter(GenreFilter::new(["Drama".to_string()].into()))
            .apply(&base);

        assert_eq!(view.len(), 1);
        assert_eq!(view.rows().next().unwrap().title, "B");
    }

    #[test]
    fn test_filter_combines_all_predicates_and_keeps_order() {
        let base = base();
        let state = FilterState::new(["Action"], ["India"], YearRange::new(2014, 2016));
        let view = filter(&base, &state);

        let titles: Vec<&str> = view.rows().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "D"]);
    }

    #[test]
    fn test_empty_selections_give_empty_view() {
        let base = base();
        let range = YearRange::new(2011, 2020);

        let no_genres = FilterState::new(Vec::<String>::new(), ["India"], range);
        assert!(filter(&base, &no_genres).is_empty());

        let no_regions = FilterState::new(["Action"], Vec::<String>::new(), range);
        assert!(filter(&base, &no_regions).is_empty());

        let inverted = FilterState::new(["Action"], ["India"], YearRange::new(2016, 2014));
        assert!(filter(&base, &inverted).is_empty());
    }

    #[test]
    fn test_filter_does_not_touch_base() {
        let base = base();
        let before: Vec<MovieRow> = base.rows().to_vec();
        let _ = filter(&base, &FilterState::new(["Drama"], ["India"], YearRange::new(2015, 2015)));
        assert_eq!(base.rows(), before.as_slice());
    }
}
