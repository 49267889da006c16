//! Top-N actor ranking for the bar chart panel.
//!
//! Ranking runs in two stages. Stage A averages `average_rating` per actor
//! and keeps the best `top_n` actors. Stage B goes back to the view, keeps
//! the rows of those actors, sorts them by the row's own rating and takes
//! the first `top_n` rows.
//!
//! Because the view is denormalized, Stage B counts rows and not actors: a
//! prolific actor can fill several slots, so the output may repeat an actor
//! and leave out others that Stage A picked. [`RankingPolicy::SourceCompatible`]
//! keeps that behavior and is the default. [`RankingPolicy::DistinctActors`]
//! is the corrected variant with one row per Stage-A actor.

use crate::params::TopN;
use data_loader::MovieRow;
use pipeline::FilteredView;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// How Stage B turns the Stage-A actor set into output rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankingPolicy {
    /// Top `top_n` rows of the selected actors; actors may repeat or drop out
    #[default]
    SourceCompatible,
    /// Exactly one row per selected actor, in Stage-A order
    DistinctActors,
}

/// One bar of the ranking chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedActor {
    pub actor_name: String,
    /// Mean rating of the actor over the whole view
    pub avg_rating: f64,
    /// Rating of the row behind this bar
    pub movie_rating: f64,
    /// Title of the row behind this bar
    pub title: String,
    /// The actor's highest-rated title in the view, for the tooltip
    pub example_title: String,
}

struct ActorStats<'a> {
    mean: f64,
    best: &'a MovieRow,
}

/// Rating descending, then title ascending
fn better_row(a: &MovieRow, b: &MovieRow) -> Ordering {
    b.average_rating
        .total_cmp(&a.average_rating)
        .then_with(|| a.title.cmp(&b.title))
}

fn actor_stats(view: &FilteredView) -> HashMap<&str, ActorStats<'_>> {
    let mut acc: HashMap<&str, (f64, usize, &MovieRow)> = HashMap::new();
    for row in view.rows() {
        acc.entry(row.actor_name.as_str())
            .and_modify(|(sum, count, best)| {
                *sum += row.average_rating;
                *count += 1;
                if better_row(row, best) == Ordering::Less {
                    *best = row;
                }
            })
            .or_insert((row.average_rating, 1, row));
    }
    acc.into_iter()
        .map(|(actor, (sum, count, best))| {
            (
                actor,
                ActorStats {
                    mean: sum / count as f64,
                    best,
                },
            )
        })
        .collect()
}

/// Stage A: actors ordered by mean rating descending, ties by name ascending
fn top_actors<'a>(stats: &HashMap<&'a str, ActorStats<'a>>, top_n: TopN) -> Vec<&'a str> {
    let mut actors: Vec<(&str, f64)> = stats.iter().map(|(a, s)| (*a, s.mean)).collect();
    actors.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    actors.truncate(top_n.get());
    actors.into_iter().map(|(actor, _)| actor).collect()
}

fn ranked(row: &MovieRow, stats: &ActorStats<'_>) -> RankedActor {
    RankedActor {
        actor_name: row.actor_name.clone(),
        avg_rating: stats.mean,
        movie_rating: row.average_rating,
        title: row.title.clone(),
        example_title: stats.best.title.clone(),
    }
}

/// Rank actors with the default [`RankingPolicy::SourceCompatible`].
pub fn ranking(view: &FilteredView, top_n: TopN) -> Vec<RankedActor> {
    ranking_with_policy(view, top_n, RankingPolicy::default())
}

/// Rank actors of `view`; the result never has more than `top_n` entries.
pub fn ranking_with_policy(
    view: &FilteredView,
    top_n: TopN,
    policy: RankingPolicy,
) -> Vec<RankedActor> {
    let stats = actor_stats(view);
    let selected = top_actors(&stats, top_n);

    let result: Vec<RankedActor> = match policy {
        RankingPolicy::SourceCompatible => {
            let mut rows: Vec<&MovieRow> = view
                .rows()
                .filter(|row| selected.contains(&row.actor_name.as_str()))
                .collect();
            // Rating descending, then actor, then title
            rows.sort_by(|a, b| {
                b.average_rating
                    .total_cmp(&a.average_rating)
                    .then_with(|| a.actor_name.cmp(&b.actor_name))
                    .then_with(|| a.title.cmp(&b.title))
            });
            rows.into_iter()
                .take(top_n.get())
                .filter_map(|row| Some(ranked(row, stats.get(row.actor_name.as_str())?)))
                .collect()
        }
        RankingPolicy::DistinctActors => selected
            .iter()
            .filter_map(|actor| {
                let stats = stats.get(actor)?;
                Some(ranked(stats.best, stats))
            })
            .collect(),
    };

    tracing::debug!(
        "Ranking ({:?}): {} actors in view, {} selected, {} rows out",
        policy,
        stats.len(),
        selected.len(),
        result.len()
    );

    result
}
