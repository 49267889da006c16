//! Per-genre time series for the trend panel.

use crate::params::Metric;
use data_loader::Year;
use pipeline::FilteredView;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean of the metric for one genre in one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub genre: String,
    pub year: Year,
    pub value: f64,
}

/// Output of the trend transform, ordered by genre then year.
///
/// Years without rows for a genre are absent from its series; nothing is
/// zero-filled or interpolated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub metric: Metric,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Genres that have at least one point
    pub fn genres(&self) -> Vec<&str> {
        let mut genres: Vec<&str> = self.points.iter().map(|p| p.genre.as_str()).collect();
        genres.dedup();
        genres
    }

    /// The points of one genre, by year
    pub fn series<'a>(&'a self, genre: &'a str) -> impl Iterator<Item = &'a TrendPoint> + 'a {
        self.points.iter().filter(move |p| p.genre == genre)
    }
}

/// Group the view by (genre, year) and average `metric` in each group.
///
/// Rows where the metric is absent (a missing runtime) do not count; a
/// group with no present value yields no point.
pub fn trend(view: &FilteredView, metric: Metric) -> TrendSeries {
    let mut groups: BTreeMap<(&str, Year), (f64, usize)> = BTreeMap::new();

    for row in view.rows() {
        if let Some(value) = metric.value(row) {
            let entry = groups
                .entry((row.genre.as_str(), row.start_year))
                .or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    let points = groups
        .into_iter()
        .map(|((genre, year), (sum, count))| TrendPoint {
            genre: genre.to_string(),
            year,
            value: sum / count as f64,
        })
        .collect();

    TrendSeries { metric, points }
}
