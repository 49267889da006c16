//! Parser for the dashboard's two input files.
//!
//! - movies CSV: primaryTitle, primaryName, genres, startYear,
//!   runtimeMinutes, averageRating, region (extra columns ignored)
//! - country codes CSV: name, alpha_2 (extra columns ignored)
//!
//! Records are deserialized into all-optional raw structs first and
//! validated here, so errors can name the file and record number.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Values the source uses for "no value"
const NULL_MARKERS: [&str; 4] = ["", "nan", "NaN", "\\N"];

/// Result of parsing the movies file
#[derive(Debug, Default)]
pub struct ParsedMovies {
    pub records: Vec<MovieRecord>,
    /// Records dropped because they carry no genre
    pub skipped_without_genre: usize,
}

/// Open a file, mapping a missing file to `FileNotFound`
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DataLoadError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            DataLoadError::IoError(e)
        }
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Trim a raw field and treat the null markers as absent
fn present(value: Option<&String>) -> Option<&str> {
    let v = value?.trim();
    if NULL_MARKERS.contains(&v) { None } else { Some(v) }
}

fn required<'a>(value: Option<&'a String>, field: &str, file: &str, record: usize) -> Result<&'a str> {
    present(value).ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        record,
        reason: format!("Missing {}", field),
    })
}

fn parse_number(value: &str, field: &str, file: &str, record: usize) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            record,
            reason: format!("Invalid {}: {}", field, value),
        })
}

/// Parse a year, accepting the "2015.0" form a float column round-trips to
fn parse_year(value: &str, file: &str, record: usize) -> Result<Year> {
    let number = parse_number(value, "startYear", file, record)?;
    if number.fract() != 0.0 || number < 0.0 || number > Year::MAX as f64 {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            record,
            reason: format!("Invalid startYear: {}", value),
        });
    }
    Ok(number as Year)
}

/// Validate one raw record.
///
/// Returns `Ok(None)` for a record without a genre.
fn validate_movie(raw: &RawMovieRecord, file: &str, record: usize) -> Result<Option<MovieRecord>> {
    let genre = match present(raw.genre.as_ref()) {
        Some(g) => g,
        None => return Ok(None),
    };

    let title = required(raw.title.as_ref(), "primaryTitle", file, record)?;
    let actor_name = required(raw.actor_name.as_ref(), "primaryName", file, record)?;
    let start_year = parse_year(required(raw.start_year.as_ref(), "startYear", file, record)?, file, record)?;
    let region_code = required(raw.region_code.as_ref(), "region", file, record)?;

    let runtime_minutes = match present(raw.runtime_minutes.as_ref()) {
        Some(v) => Some(parse_number(v, "runtimeMinutes", file, record)?),
        None => None,
    };

    let rating_str = required(raw.average_rating.as_ref(), "averageRating", file, record)?;
    let average_rating = parse_number(rating_str, "averageRating", file, record)?;
    if !(0.0..=10.0).contains(&average_rating) {
        return Err(DataLoadError::InvalidValue {
            field: "averageRating".to_string(),
            value: rating_str.to_string(),
        });
    }

    Ok(Some(MovieRecord {
        title: title.to_string(),
        actor_name: actor_name.to_string(),
        genre: genre.to_string(),
        start_year,
        runtime_minutes,
        average_rating,
        region_code: region_code.to_string(),
    }))
}

/// Parse movie records from any reader
///
/// `file` is only used to label errors.
pub fn read_movies<R: Read>(reader: R, file: &str) -> Result<ParsedMovies> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut parsed = ParsedMovies::default();

    for (idx, result) in rdr.deserialize::<RawMovieRecord>().enumerate() {
        let record_no = idx + 1;
        let raw = result.map_err(|source| DataLoadError::CsvError {
            file: file.to_string(),
            source,
        })?;

        match validate_movie(&raw, file, record_no)? {
            Some(record) => parsed.records.push(record),
            None => parsed.skipped_without_genre += 1,
        }
    }

    Ok(parsed)
}

/// Parse the movies CSV file
pub fn parse_movies(path: &Path) -> Result<ParsedMovies> {
    read_movies(open(path)?, &file_label(path))
}

/// Parse region records from any reader
pub fn read_regions<R: Read>(reader: R, file: &str) -> Result<Vec<RegionRecord>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut regions = Vec::new();

    for (idx, result) in rdr.deserialize::<RegionRecord>().enumerate() {
        let record_no = idx + 1;
        let mut region = result.map_err(|source| DataLoadError::CsvError {
            file: file.to_string(),
            source,
        })?;

        region.alpha_2 = region.alpha_2.trim().to_string();
        region.name = region.name.trim().to_string();
        if region.alpha_2.is_empty() || region.name.is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                record: record_no,
                reason: "Missing name or alpha_2".to_string(),
            });
        }
        regions.push(region);
    }

    Ok(regions)
}

/// Parse the country-codes CSV file
pub fn parse_regions(path: &Path) -> Result<Vec<RegionRecord>> {
    read_regions(open(path)?, &file_label(path))
}
