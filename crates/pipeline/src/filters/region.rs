//! Filter to keep only rows from the selected regions.
//!
//! Regions are selected by their joined name, not by code, because the
//! region picker lists names.

use crate::traits::RowFilter;
use data_loader::MovieRow;
use std::collections::BTreeSet;

/// Keeps rows whose region name is in the selected set.
pub struct RegionFilter {
    regions: BTreeSet<String>,
}

impl RegionFilter {
    pub fn new(regions: BTreeSet<String>) -> Self {
        Self { regions }
    }
}

impl RowFilter for RegionFilter {
    fn name(&self) -> &str {
        "RegionFilter"
    }

    fn keep(&self, row: &MovieRow) -> bool {
        self.regions.contains(row.region_name.as_str())
    }
}
