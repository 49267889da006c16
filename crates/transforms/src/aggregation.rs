//! KPI bundle for the dashboard header.

use crate::stats::{mean, round_to};
use pipeline::FilteredView;
use serde::Serialize;
use std::collections::HashSet;

/// The four scalar KPIs.
///
/// For an empty view the counts are 0 and both averages are `None`; that
/// pair is the "no data" sentinel the header renders as blanks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    /// Distinct titles
    pub movie_count: usize,
    /// Distinct actor names
    pub actor_count: usize,
    /// Mean runtime in minutes, rounded to an integer
    pub avg_runtime: Option<i64>,
    /// Mean rating, rounded to one decimal
    pub avg_rating: Option<f64>,
}

impl Kpis {
    pub fn empty() -> Self {
        Self {
            movie_count: 0,
            actor_count: 0,
            avg_runtime: None,
            avg_rating: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movie_count == 0
    }
}

/// Compute the KPIs over the rows of `view`.
///
/// Averages are taken over rows, not distinct movies, so a movie counts
/// once per (actor, genre) row it has. Rows without a runtime are left out
/// of the runtime mean.
pub fn summarize(view: &FilteredView) -> Kpis {
    if view.is_empty() {
        return Kpis::empty();
    }

    let mut titles: HashSet<&str> = HashSet::new();
    let mut actors: HashSet<&str> = HashSet::new();
    for row in view.rows() {
        titles.insert(row.title.as_str());
        actors.insert(row.actor_name.as_str());
    }

    let avg_runtime = mean(view.rows().filter_map(|r| r.runtime_minutes))
        .map(|m| round_to(m, 0) as i64);
    let avg_rating = mean(view.rows().map(|r| r.average_rating)).map(|m| round_to(m, 1));

    Kpis {
        movie_count: titles.len(),
        actor_count: actors.len(),
        avg_runtime,
        avg_rating,
    }
}
