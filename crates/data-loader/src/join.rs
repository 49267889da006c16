//! Building the BaseTable from parsed records.
//!
//! - parse both input files in parallel
//! - inner-join movie records with the region lookup
//! - validate the result

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

impl BaseTable {
    /// Load the base table from the movies CSV and the country-codes CSV.
    ///
    /// This is the only way the dashboard obtains its dataset; any error
    /// here is fatal at startup.
    pub fn load_from_files(movies_path: &Path, regions_path: &Path) -> Result<Self> {
        info!(
            "Loading dataset from {} and {}",
            movies_path.display(),
            regions_path.display()
        );

        // The files are independent, so parse them in parallel
        let (movies, regions) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_regions(regions_path),
        );
        let movies = movies?;
        let regions = regions?;

        if movies.skipped_without_genre > 0 {
            debug!(
                "Skipped {} movie records without a genre",
                movies.skipped_without_genre
            );
        }

        let lookup = RegionLookup::from_records(regions);
        info!(
            "Parsed {} movie records and {} region codes",
            movies.records.len(),
            lookup.len()
        );

        let parsed_count = movies.records.len();
        let table = Self::join(movies.records, &lookup);
        table.validate(parsed_count)?;

        let (rows, titles, actors) = table.counts();
        info!(
            "Base table ready: {} rows, {} movies, {} actors",
            rows, titles, actors
        );
        Ok(table)
    }

    /// Inner-join movie records with the region lookup.
    ///
    /// Records whose region code has no lookup entry are dropped. Each
    /// unmatched code is logged once with the number of rows it cost.
    pub fn join(records: Vec<MovieRecord>, lookup: &RegionLookup) -> Self {
        let mut unmatched: BTreeMap<RegionCode, usize> = BTreeMap::new();

        let rows: Vec<MovieRow> = records
            .into_iter()
            .filter_map(|record| match lookup.get(&record.region_code) {
                Some(name) => {
                    let name = name.to_string();
                    Some(MovieRow::from_record(record, name))
                }
                None => {
                    *unmatched.entry(record.region_code).or_insert(0) += 1;
                    None
                }
            })
            .collect();

        for (code, dropped) in &unmatched {
            warn!(
                region_code = %code,
                dropped,
                "Region code has no lookup entry; rows dropped"
            );
        }

        Self::from_rows(rows)
    }

    /// Check that the joined table is usable.
    fn validate(&self, parsed_count: usize) -> Result<()> {
        if self.is_empty() {
            return Err(DataLoadError::EmptyDataset {
                movies: parsed_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(title: &str, region: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            actor_name: "Ann Lee".to_string(),
            genre: "Action".to_string(),
            start_year: 2015,
            runtime_minutes: Some(100.0),
            average_rating: 7.0,
            region_code: region.to_string(),
        }
    }

    fn lookup() -> RegionLookup {
        RegionLookup::from_records(vec![
            RegionRecord {
                name: "United States of America".to_string(),
                alpha_2: "US".to_string(),
            },
            RegionRecord {
                name: "India".to_string(),
                alpha_2: "IN".to_string(),
            },
        ])
    }

    #[test]
    fn test_join_drops_unmatched_regions() {
        let records = vec![record("A", "US"), record("B", "XX"), record("C", "IN")];
        let table = BaseTable::join(records, &lookup());

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].region_name, "United States of America");
        assert_eq!(table.rows()[1].region_name, "India");
        assert!(table.rows().iter().all(|r| r.region_code != "XX"));
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let table = BaseTable::join(vec![record("A", "XX")], &lookup());
        let err = table.validate(1).unwrap_err();
        assert!(matches!(err, DataLoadError::EmptyDataset { movies: 1 }));
    }

    #[test]
    fn test_load_from_files() {
        let dir = std::env::temp_dir().join(format!("data-loader-join-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let movies_path = dir.join("movies.csv");
        let regions_path = dir.join("country_codes.csv");

        let mut movies = std::fs::File::create(&movies_path).unwrap();
        writeln!(movies, "primaryTitle,primaryName,genres,startYear,runtimeMinutes,averageRating,region").unwrap();
        writeln!(movies, "Heat Wave,Ann Lee,Action,2015,110,7.5,US").unwrap();
        writeln!(movies, "Lost Code,Bo Chan,Drama,2012,95,6.0,ZZ").unwrap();
        let mut regions = std::fs::File::create(&regions_path).unwrap();
        writeln!(regions, "name,alpha_2").unwrap();
        writeln!(regions, "United States of America,US").unwrap();

        let table = BaseTable::load_from_files(&movies_path, &regions_path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.year_bounds(), Some((2015, 2015)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
