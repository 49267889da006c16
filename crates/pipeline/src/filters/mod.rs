//! Filter implementations for the filter pipeline.
//!
//! One filter per FilterState predicate; `filter()` composes all three.

pub mod genre;
pub mod region;
pub mod year_range;

// Re-export for convenience
pub use genre::GenreFilter;
pub use region::RegionFilter;
pub use year_range::YearRangeFilter;
