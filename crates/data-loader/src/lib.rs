//! # Data Loader Crate
//!
//! This crate loads the IMDb 2011-2020 dataset and joins it with the
//! region-code table, producing the immutable base table every dashboard
//! panel is computed from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRow, RegionLookup, BaseTable)
//! - **parser**: Parse the CSV files into validated records
//! - **join**: Inner-join records with region names and build the BaseTable
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::BaseTable;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let base = Arc::new(BaseTable::load_from_files(
//!     Path::new("data/imdb_2011-2020.csv"),
//!     Path::new("data/country_codes.csv"),
//! )?);
//!
//! println!("{} genres, {} regions", base.genres().len(), base.region_names().len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod join;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    Year,
    RegionCode,
    // Core types
    BaseTable,
    MovieRecord,
    MovieRow,
    RawMovieRecord,
    RegionLookup,
    RegionRecord,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, actor: &str, genre: &str, year: Year, region: &str) -> MovieRow {
        MovieRow {
            title: title.to_string(),
            actor_name: actor.to_string(),
            genre: genre.to_string(),
            start_year: year,
            runtime_minutes: Some(100.0),
            average_rating: 7.0,
            region_code: "XX".to_string(),
            region_name: region.to_string(),
        }
    }

    #[test]
    fn test_empty_base_table() {
        let table = BaseTable::default();
        assert_eq!(table.counts(), (0, 0, 0));
        assert!(table.genres().is_empty());
        assert_eq!(table.year_bounds(), None);
    }

    #[test]
    fn test_filter_options_are_sorted_and_distinct() {
        let table = BaseTable::from_rows(vec![
            row("A", "Ann", "Drama", 2014, "India"),
            row("A", "Ann", "Action", 2014, "India"),
            row("B", "Bo", "Drama", 2011, "Canada"),
            row("C", "Ann", "Horror", 2020, "India"),
        ]);

        assert_eq!(table.genres(), vec!["Action", "Drama", "Horror"]);
        assert_eq!(table.region_names(), vec!["Canada", "India"]);
        assert_eq!(table.year_bounds(), Some((2011, 2020)));
        assert_eq!(table.counts(), (4, 3, 2));
    }

    #[test]
    fn test_region_lookup_first_code_wins() {
        let lookup = RegionLookup::from_records(vec![
            RegionRecord { name: "India".to_string(), alpha_2: "IN".to_string() },
            RegionRecord { name: "Republic of India".to_string(), alpha_2: "IN".to_string() },
        ]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get("IN"), Some("India"));
        assert_eq!(lookup.get("US"), None);
    }
}
