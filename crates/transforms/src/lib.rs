//! Panel transforms for the IMDb dashboard.
//!
//! Every transform is a pure function of a [`FilteredView`] (or, for the
//! map, the base table) plus validated parameters, returning a
//! serializable value the rendering layer draws.
//!
//! - **aggregation**: KPI header (movie and actor counts, mean runtime and rating)
//! - **distribution**: per-genre rating box plots over deduplicated movies
//! - **trend**: per-genre yearly means of a selectable metric
//! - **ranking**: top-N actors by mean rating
//! - **geo**: best movie of each region
//!
//! ## Example Usage
//! ```ignore
//! use transforms::{distribution, ranking, summarize, trend, Metric, TopN};
//!
//! let view = pipeline::filter(&base, &state);
//! let kpis = summarize(&view);
//! let series = trend(&view, "runtimeMinutes".parse::<Metric>()?);
//! let actors = ranking(&view, TopN::new(5)?);
//! ```
//!
//! [`FilteredView`]: pipeline::FilteredView

pub mod stats;
pub mod params;
pub mod aggregation;
pub mod distribution;
pub mod trend;
pub mod ranking;
pub mod geo;

pub use pipeline::{ParameterError, Result};
pub use stats::FiveNumberSummary;
pub use params::{Metric, TopN};
pub use aggregation::{summarize, Kpis};
pub use distribution::{dedup_rows, distribution, DistinctMovie, GenreRatingSummary, RatingDistribution};
pub use trend::{trend, TrendPoint, TrendSeries};
pub use ranking::{ranking, ranking_with_policy, RankedActor, RankingPolicy};
pub use geo::{top_per_region, TopMovie};
