//! Filter state supplied by the UI layer.

use crate::error::{ParameterError, Result};
use data_loader::{BaseTable, Year};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive year range `[min, max]`.
///
/// A range with `min > max` is allowed inside a [`FilterState`] and simply
/// matches nothing. Use [`YearRange::checked`] where such a range arrives
/// as a parameter and must be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub min: Year,
    pub max: Year,
}

impl YearRange {
    pub fn new(min: Year, max: Year) -> Self {
        Self { min, max }
    }

    /// Build a range, rejecting `min > max`
    pub fn checked(min: Year, max: Year) -> Result<Self> {
        if min > max {
            return Err(ParameterError::invalid(
                "yearRange",
                format!("[{}, {}]", min, max),
                "min must not be greater than max",
            ));
        }
        Ok(Self { min, max })
    }

    /// Both bounds are inclusive
    pub fn contains(&self, year: Year) -> bool {
        self.min <= year && year <= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// The three active filter predicates.
///
/// Treated as an immutable value per computation; `Eq + Hash` so it can key
/// the filtered-view cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    pub genres: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub year_range: YearRange,
}

impl FilterState {
    pub fn new<G, R>(genres: G, regions: R, year_range: YearRange) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            genres: genres.into_iter().map(Into::into).collect(),
            regions: regions.into_iter().map(Into::into).collect(),
            year_range,
        }
    }

    /// Select every genre, region and year present in `base`
    pub fn select_all(base: &BaseTable) -> Self {
        let (min, max) = base.year_bounds().unwrap_or((0, 0));
        Self::new(base.genres(), base.region_names(), YearRange::new(min, max))
    }

    /// True when no row can possibly match
    pub fn selects_nothing(&self) -> bool {
        self.genres.is_empty() || self.regions.is_empty() || self.year_range.is_empty()
    }
}
