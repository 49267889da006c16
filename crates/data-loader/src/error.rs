//! Error types for the data-loader crate.
//!
//! Every variant here is a load failure: the dashboard cannot start
//! without a valid base table, so callers treat these as fatal.

use thiserror::Error;

/// Errors that can occur while loading and joining the dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the file (bad quoting, bad UTF-8, ...)
    #[error("CSV error in {file}: {source}")]
    CsvError {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A record in a data file couldn't be parsed
    ///
    /// `record` is 1-based and does not count the header row.
    #[error("Parse error at record {record} in {file}: {reason}")]
    ParseError {
        file: String,
        record: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Nothing survived parsing and the region join
    #[error("Base table is empty after joining {movies} movie rows with the region lookup")]
    EmptyDataset { movies: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
