//! Filter for the selected release-year range.

use crate::state::YearRange;
use crate::traits::RowFilter;
use data_loader::MovieRow;

/// Keeps rows with `min <= start_year <= max`.
pub struct YearRangeFilter {
    range: YearRange,
}

impl YearRangeFilter {
    pub fn new(range: YearRange) -> Self {
        Self { range }
    }
}

impl RowFilter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn keep(&self, row: &MovieRow) -> bool {
        self.range.contains(row.start_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: u16) -> MovieRow {
        MovieRow {
            title: format!("Movie ({})", year),
            actor_name: "Ann Lee".to_string(),
            genre: "Action".to_string(),
            start_year: year,
            runtime_minutes: Some(95.0),
            average_rating: 6.5,
            region_code: "IN".to_string(),
            region_name: "India".to_string(),
        }
    }

    #[test]
    fn test_year_range_filter_bounds_are_inclusive() {
        let filter = YearRangeFilter::new(YearRange::new(2015, 2016));

        assert!(!filter.keep(&row(2014)));
        assert!(filter.keep(&row(2015)));
        assert!(filter.keep(&row(2016)));
        assert!(!filter.keep(&row(2017)));
    }

    #[test]
    fn test_inverted_range_keeps_nothing() {
        let filter = YearRangeFilter::new(YearRange::new(2016, 2015));
        assert!((2010..=2021).all(|y| !filter.keep(&row(y))));
    }
}
