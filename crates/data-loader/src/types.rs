//! Core domain types for the IMDb 2011-2020 dataset.
//!
//! The dataset is denormalized: one physical movie appears once per
//! (actor, genre) pair it is associated with. Every type downstream has
//! to live with that, so it is spelled out here once.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Release year of a movie (`startYear` in the source data)
pub type Year = u16;

/// Two-letter region code, e.g. "US"
pub type RegionCode = String;

// =============================================================================
// Input Records
// =============================================================================

/// Direct mapping of one record of the movies CSV.
///
/// Every field is an optional string: the CSV is deserialized first and
/// validated afterwards in `parser.rs`, so a bad value can be reported
/// with its record number instead of a generic serde message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovieRecord {
    #[serde(rename = "primaryTitle")]
    pub title: Option<String>,
    #[serde(rename = "primaryName")]
    pub actor_name: Option<String>,
    #[serde(rename = "genres")]
    pub genre: Option<String>,
    #[serde(rename = "startYear")]
    pub start_year: Option<String>,
    #[serde(rename = "runtimeMinutes")]
    pub runtime_minutes: Option<String>,
    #[serde(rename = "averageRating")]
    pub average_rating: Option<String>,
    #[serde(rename = "region")]
    pub region_code: Option<String>,
}

/// A validated movie record, before the region join
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub actor_name: String,
    pub genre: String,
    pub start_year: Year,
    /// `None` when the source has no runtime for this movie
    pub runtime_minutes: Option<f64>,
    pub average_rating: f64,
    pub region_code: RegionCode,
}

/// One record of the country-codes CSV
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    pub alpha_2: String,
}

// =============================================================================
// Joined Row
// =============================================================================

/// One row of the base table: a (movie, actor, genre) combination joined
/// with its region name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRow {
    pub title: String,
    pub actor_name: String,
    /// A single genre; multi-genre movies are split into one row per genre
    pub genre: String,
    pub start_year: Year,
    pub runtime_minutes: Option<f64>,
    /// IMDb rating, 0.0 to 10.0
    pub average_rating: f64,
    pub region_code: RegionCode,
    pub region_name: String,
}

impl MovieRow {
    /// Attach a region name to a validated record
    pub fn from_record(record: MovieRecord, region_name: String) -> Self {
        Self {
            title: record.title,
            actor_name: record.actor_name,
            genre: record.genre,
            start_year: record.start_year,
            runtime_minutes: record.runtime_minutes,
            average_rating: record.average_rating,
            region_code: record.region_code,
            region_name,
        }
    }
}

// =============================================================================
// Region Lookup
// =============================================================================

/// Mapping from region code to region name
#[derive(Debug, Clone, Default)]
pub struct RegionLookup {
    names: HashMap<RegionCode, String>,
}

impl RegionLookup {
    /// Build the lookup. When a code appears twice the first name wins.
    pub fn from_records(records: impl IntoIterator<Item = RegionRecord>) -> Self {
        let mut names = HashMap::new();
        for record in records {
            names.entry(record.alpha_2).or_insert(record.name);
        }
        Self { names }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// =============================================================================
// BaseTable - The Immutable In-Memory Dataset
// =============================================================================

/// The full joined dataset, loaded once at startup.
///
/// There is no `&mut` API: once built, a `BaseTable` is shared read-only
/// through `Arc<BaseTable>` for the lifetime of the process.
#[derive(Debug, Default)]
pub struct BaseTable {
    rows: Vec<MovieRow>,
}

impl BaseTable {
    /// Wrap already-joined rows
    pub fn from_rows(rows: Vec<MovieRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MovieRow] {
        &self.rows
    }

    pub fn row(&self, position: usize) -> Option<&MovieRow> {
        self.rows.get(position)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted distinct genres, i.e. the genre filter options
    pub fn genres(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.genre.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted distinct region names, i.e. the region filter options
    pub fn region_names(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.region_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Smallest and largest `start_year`, `None` for an empty table
    pub fn year_bounds(&self) -> Option<(Year, Year)> {
        let min = self.rows.iter().map(|r| r.start_year).min()?;
        let max = self.rows.iter().map(|r| r.start_year).max()?;
        Some((min, max))
    }

    /// (rows, distinct titles, distinct actors) for logging
    pub fn counts(&self) -> (usize, usize, usize) {
        let titles: BTreeSet<&str> = self.rows.iter().map(|r| r.title.as_str()).collect();
        let actors: BTreeSet<&str> = self.rows.iter().map(|r| r.actor_name.as_str()).collect();
        (self.rows.len(), titles.len(), actors.len())
    }
}
