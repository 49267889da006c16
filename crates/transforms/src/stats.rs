//! Small numeric helpers shared by the transforms.

use serde::Serialize;

/// Arithmetic mean, `None` for no values
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { None } else { Some(sum / count as f64) }
}

/// Round to `decimals` places, ties to even (how the dashboard has always
/// rounded its KPIs: 2.5 -> 2, 3.5 -> 4).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Quantile of already-sorted values using linear interpolation between
/// the closest ranks.
///
/// `sorted` must be non-empty and `p` in `[0, 1]`.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

/// Min, first quartile, median, third quartile, max
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Summarize `values`; `None` when there are none.
    ///
    /// A single value yields a degenerate summary with all five equal.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        Some(Self {
            min: values[0],
            q1: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q3: quantile(&values, 0.75),
            max: values[values.len() - 1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(Vec::new()), None);
        assert_eq!(mean(vec![1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_round_to_ties_even() {
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(104.6, 0), 105.0);
        assert_eq!(round_to(6.44, 1), 6.4);
        assert_eq!(round_to(6.46, 1), 6.5);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_five_number_summary() {
        let summary = FiveNumberSummary::from_values(vec![9.0, 1.0, 5.0, 3.0, 7.0]).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 3.0);
        assert_eq!(summary.median, 5.0);
        assert_eq!(summary.q3, 7.0);
        assert_eq!(summary.max, 9.0);
    }

    #[test]
    fn test_single_value_summary_is_degenerate() {
        let summary = FiveNumberSummary::from_values(vec![6.2]).unwrap();
        assert_eq!(
            summary,
            FiveNumberSummary { min: 6.2, q1: 6.2, median: 6.2, q3: 6.2, max: 6.2 }
        );
        assert!(FiveNumberSummary::from_values(Vec::new()).is_none());
    }
}
