//! Filter to keep only rows in the selected genres.

use crate::traits::RowFilter;
use data_loader::MovieRow;
use std::collections::BTreeSet;

/// Keeps rows whose genre is in the selected set.
///
/// An empty selection keeps nothing.
pub struct GenreFilter {
    genres: BTreeSet<String>,
}

impl GenreFilter {
    pub fn new(genres: BTreeSet<String>) -> Self {
        Self { genres }
    }
}

impl RowFilter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn keep(&self, row: &MovieRow) -> bool {
        self.genres.contains(row.genre.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(genre: &str) -> MovieRow {
        MovieRow {
            title: "Heat Wave".to_string(),
            actor_name: "Ann Lee".to_string(),
            genre: genre.to_string(),
            start_year: 2015,
            runtime_minutes: Some(100.0),
            average_rating: 7.0,
            region_code: "US".to_string(),
            region_name: "United States of America".to_string(),
        }
    }

    #[test]
    fn test_genre_filter() {
        let filter = GenreFilter::new(["Action".to_string(), "Horror".to_string()].into());

        assert!(filter.keep(&row("Action")));
        assert!(filter.keep(&row("Horror")));
        assert!(!filter.keep(&row("Drama")));
        // Matching is exact
        assert!(!filter.keep(&row("action")));
    }

    #[test]
    fn test_empty_selection_keeps_nothing() {
        let filter = GenreFilter::new(BTreeSet::new());
        assert!(!filter.keep(&row("Action")));
    }
}
