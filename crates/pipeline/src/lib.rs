//! FilterEngine for the IMDb dashboard.
//!
//! This crate provides:
//! - FilterState, the genre/region/year selection supplied by the UI
//! - RowFilter trait and one implementation per predicate
//! - FilterPipeline for composing filters over the base table
//! - FilteredView, the shared result every dashboard panel reads
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{filter, FilterState, YearRange};
//!
//! let state = FilterState::new(
//!     ["Action", "Horror", "Romance"],
//!     ["United States of America", "India"],
//!     YearRange::checked(2011, 2020)?,
//! );
//! let view = filter(&base, &state);
//! println!("{} of {} rows selected", view.len(), base.len());
//! ```

pub mod error;
pub mod state;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod view;

// Re-export main types
pub use error::{ParameterError, Result};
pub use state::{FilterState, YearRange};
pub use traits::RowFilter;
pub use filter_pipeline::{filter, FilterPipeline};
pub use view::FilteredView;
