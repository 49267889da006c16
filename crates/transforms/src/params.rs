//! Validated transform parameters.
//!
//! Both parameters arrive from the UI layer as loose values; they are
//! parsed here once and rejected with a [`ParameterError`] when out of range.

use data_loader::MovieRow;
use pipeline::{ParameterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metric plotted by the trend panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    #[default]
    AverageRating,
    RuntimeMinutes,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::AverageRating, Metric::RuntimeMinutes];

    /// Source column name, also the accepted parameter value
    pub fn column(&self) -> &'static str {
        match self {
            Metric::AverageRating => "averageRating",
            Metric::RuntimeMinutes => "runtimeMinutes",
        }
    }

    /// Panel title prefix, e.g. "Average Rating by Genre over Time"
    pub fn title(&self) -> &'static str {
        match self {
            Metric::AverageRating => "Average Rating",
            Metric::RuntimeMinutes => "Average Runtime",
        }
    }

    /// Y-axis label of the trend chart
    pub fn axis_label(&self) -> &'static str {
        match self {
            Metric::AverageRating => "Average Rating (/10)",
            Metric::RuntimeMinutes => "Average Runtime (minutes)",
        }
    }

    /// The metric's value for one row; runtimes may be absent
    pub fn value(&self, row: &MovieRow) -> Option<f64> {
        match self {
            Metric::AverageRating => Some(row.average_rating),
            Metric::RuntimeMinutes => row.runtime_minutes,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self> {
        Metric::ALL
            .into_iter()
            .find(|m| m.column() == s)
            .ok_or_else(|| {
                ParameterError::invalid("metric", s, "expected `averageRating` or `runtimeMinutes`")
            })
    }
}

/// Number of actors shown by the ranking panel, 1 to 15
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TopN(usize);

impl TopN {
    pub const MIN: usize = 1;
    pub const MAX: usize = 15;
    pub const DEFAULT: usize = 10;

    pub fn new(n: usize) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&n) {
            return Err(ParameterError::invalid(
                "topN",
                n,
                format!("must be between {} and {}", Self::MIN, Self::MAX),
            ));
        }
        Ok(Self(n))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for TopN {
    type Error = ParameterError;

    fn try_from(n: usize) -> Result<Self> {
        Self::new(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_parsing() {
        assert_eq!("averageRating".parse::<Metric>().unwrap(), Metric::AverageRating);
        assert_eq!("runtimeMinutes".parse::<Metric>().unwrap(), Metric::RuntimeMinutes);

        let err = "revenue".parse::<Metric>().unwrap_err();
        assert!(matches!(err, ParameterError::InvalidParameter { name: "metric", .. }));
        // No case folding
        assert!("AverageRating".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_labels() {
        assert_eq!(Metric::RuntimeMinutes.title(), "Average Runtime");
        assert_eq!(Metric::AverageRating.axis_label(), "Average Rating (/10)");
        assert_eq!(Metric::default().to_string(), "averageRating");
    }

    #[test]
    fn test_top_n_bounds() {
        assert!(TopN::new(0).is_err());
        assert_eq!(TopN::new(1).unwrap().get(), 1);
        assert_eq!(TopN::new(15).unwrap().get(), 15);
        assert!(TopN::new(16).is_err());
        assert_eq!(TopN::default().get(), 10);
    }
}
