//! Per-genre rating distribution for the box-plot panel.
//!
//! The view has one row per (movie, actor, genre). Rating distributions
//! must count each movie once per genre, so the actor column is dropped
//! and exact duplicates removed before any statistics are taken.

use crate::stats::FiveNumberSummary;
use data_loader::{MovieRow, Year};
use pipeline::FilteredView;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A view row with the actor column dropped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistinctMovie {
    pub title: String,
    pub genre: String,
    pub start_year: Year,
    pub runtime_minutes: Option<f64>,
    pub average_rating: f64,
    pub region_code: String,
    pub region_name: String,
}

/// Hashable identity of a `DistinctMovie`; floats compare by bit pattern
#[derive(PartialEq, Eq, Hash)]
struct DedupKey<'a> {
    title: &'a str,
    genre: &'a str,
    start_year: Year,
    runtime_bits: Option<u64>,
    rating_bits: u64,
    region_code: &'a str,
    region_name: &'a str,
}

impl<'a> DedupKey<'a> {
    fn of(row: &'a MovieRow) -> Self {
        Self {
            title: &row.title,
            genre: &row.genre,
            start_year: row.start_year,
            runtime_bits: row.runtime_minutes.map(f64::to_bits),
            rating_bits: row.average_rating.to_bits(),
            region_code: &row.region_code,
            region_name: &row.region_name,
        }
    }
}

/// Drop the actor column and remove exact duplicates, keeping the first
/// occurrence of each remaining tuple in view order.
pub fn dedup_rows(view: &FilteredView) -> Vec<DistinctMovie> {
    let mut seen: HashSet<DedupKey<'_>> = HashSet::new();
    view.rows()
        .filter(|row| seen.insert(DedupKey::of(*row)))
        .map(|row| DistinctMovie {
            title: row.title.clone(),
            genre: row.genre.clone(),
            start_year: row.start_year,
            runtime_minutes: row.runtime_minutes,
            average_rating: row.average_rating,
            region_code: row.region_code.clone(),
            region_name: row.region_name.clone(),
        })
        .collect()
}

/// Rating summary of one genre
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRatingSummary {
    pub genre: String,
    /// Number of distinct movies behind the summary
    pub count: usize,
    pub summary: FiveNumberSummary,
}

/// Output of the distribution transform
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatingDistribution {
    /// Distinct genres in order of first appearance, for stable legend colors
    pub genres: Vec<String>,
    /// One summary per entry of `genres`, same order
    pub summaries: Vec<GenreRatingSummary>,
}

impl RatingDistribution {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn get(&self, genre: &str) -> Option<&GenreRatingSummary> {
        self.summaries.iter().find(|s| s.genre == genre)
    }
}

/// Deduplicate the view and summarize `average_rating` per genre.
pub fn distribution(view: &FilteredView) -> RatingDistribution {
    let movies = dedup_rows(view);

    let mut genres: Vec<String> = Vec::new();
    let mut ratings: HashMap<&str, Vec<f64>> = HashMap::new();
    for movie in &movies {
        let entry = ratings.entry(movie.genre.as_str()).or_insert_with(|| {
            genres.push(movie.genre.clone());
            Vec::new()
        });
        entry.push(movie.average_rating);
    }

    let summaries: Vec<GenreRatingSummary> = genres
        .par_iter()
        .filter_map(|genre| {
            let values = ratings.get(genre.as_str())?.clone();
            let count = values.len();
            let summary = FiveNumberSummary::from_values(values)?;
            Some(GenreRatingSummary {
                genre: genre.clone(),
                count,
                summary,
            })
        })
        .collect();

    tracing::debug!(
        "Rating distribution: {} view rows, {} distinct movies, {} genres",
        view.len(),
        movies.len(),
        summaries.len()
    );

    RatingDistribution { genres, summaries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::BaseTable;
    use std::sync::Arc;

    fn row(title: &str, actor: &str, genre: &str, rating: f64) -> MovieRow {
        MovieRow {
            title: title.to_string(),
            actor_name: actor.to_string(),
            genre: genre.to_string(),
            start_year: 2015,
            runtime_minutes: Some(100.0),
            average_rating: rating,
            region_code: "IN".to_string(),
            region_name: "India".to_string(),
        }
    }

    fn view(rows: Vec<MovieRow>) -> FilteredView {
        FilteredView::unfiltered(Arc::new(BaseTable::from_rows(rows)))
    }

    #[test]
    fn test_dedup_drops_actor_duplicates() {
        let view = view(vec![
            row("Heat Wave", "Ann Lee", "Action", 7.0),
            row("Heat Wave", "Bo Chan", "Action", 7.0),
            row("Heat Wave", "Cy Diaz", "Action", 7.0),
            row("Heat Wave", "Ann Lee", "Drama", 7.0),
            row("Quiet Days", "Ann Lee", "Drama", 6.0),
        ]);
        let movies = dedup_rows(&view);

        assert_eq!(movies.len(), 3);
        let mut pairs: Vec<(&str, &str)> =
            movies.iter().map(|m| (m.title.as_str(), m.genre.as_str())).collect();
        let before = pairs.len();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), before, "no (title, genre) pair may repeat");
    }

    #[test]
    fn test_dedup_keeps_distinct_movies_sharing_a_title() {
        let mut remake = row("Heat Wave", "Bo Chan", "Action", 8.0);
        remake.start_year = 2018;
        let view = view(vec![
            row("Heat Wave", "Ann Lee", "Action", 6.0),
            row("Heat Wave", "Cy Diaz", "Action", 6.0),
            remake,
        ]);
        let movies = dedup_rows(&view);

        let keys: Vec<(&str, &str, Year)> = movies
            .iter()
            .map(|m| (m.title.as_str(), m.genre.as_str(), m.start_year))
            .collect();
        assert_eq!(keys, vec![("Heat Wave", "Action", 2015), ("Heat Wave", "Action", 2018)]);
        assert_eq!(distribution(&view).get("Action").unwrap().count, 2);
    }

    #[test]
    fn test_distribution_counts_each_movie_once() {
        let view = view(vec![
            // One action movie with three actors must not outweigh the others
            row("A", "Ann Lee", "Action", 9.0),
            row("A", "Bo Chan", "Action", 9.0),
            row("A", "Cy Diaz", "Action", 9.0),
            row("B", "Ann Lee", "Action", 5.0),
            row("C", "Ann Lee", "Action", 6.0),
            row("D", "Bo Chan", "Drama", 7.0),
        ]);
        let dist = distribution(&view);

        assert_eq!(dist.genres, vec!["Action", "Drama"]);
        let action = dist.get("Action").unwrap();
        assert_eq!(action.count, 3);
        assert_eq!(action.summary.min, 5.0);
        assert_eq!(action.summary.median, 6.0);
        assert_eq!(action.summary.max, 9.0);
    }

    #[test]
    fn test_single_row_genre_is_degenerate() {
        let dist = distribution(&view(vec![row("D", "Bo Chan", "Drama", 7.0)]));
        let drama = dist.get("Drama").unwrap();
        assert_eq!(drama.count, 1);
        assert_eq!(drama.summary.q1, 7.0);
        assert_eq!(drama.summary.q3, 7.0);
    }

    #[test]
    fn test_empty_view_gives_empty_distribution() {
        let dist = distribution(&view(Vec::new()));
        assert!(dist.is_empty());
        assert!(dist.summaries.is_empty());
    }

    #[test]
    fn test_genre_order_is_first_appearance() {
        let dist = distribution(&view(vec![
            row("A", "Ann Lee", "Romance", 7.0),
            row("B", "Ann Lee", "Action", 7.0),
            row("C", "Ann Lee", "Romance", 6.0),
        ]));
        assert_eq!(dist.genres, vec!["Romance", "Action"]);
        let order: Vec<&str> = dist.summaries.iter().map(|s| s.genre.as_str()).collect();
        assert_eq!(order, vec!["Romance", "Action"]);
    }
}
