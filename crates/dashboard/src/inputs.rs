//! Inputs of one dashboard update and the initial selection.

use crate::graph::InputKind;
use data_loader::Year;
use pipeline::{FilterState, YearRange};
use serde::Serialize;
use std::collections::BTreeSet;
use transforms::{Metric, TopN};

/// Everything the user can change
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DashboardInputs {
    pub filter: FilterState,
    pub metric: Metric,
    pub top_n: TopN,
}

impl DashboardInputs {
    pub fn new(filter: FilterState, metric: Metric, top_n: TopN) -> Self {
        Self { filter, metric, top_n }
    }

    /// Inputs that differ between `self` and `previous`
    pub fn changed_since(&self, previous: &DashboardInputs) -> BTreeSet<InputKind> {
        let mut changed = BTreeSet::new();
        if self.filter != previous.filter {
            changed.insert(InputKind::Filter);
        }
        if self.metric != previous.metric {
            changed.insert(InputKind::Metric);
        }
        if self.top_n != previous.top_n {
            changed.insert(InputKind::TopN);
        }
        changed
    }
}

impl Default for DashboardInputs {
    fn default() -> Self {
        DashboardDefaults::inputs()
    }
}

/// The selection the dashboard opens with
pub struct DashboardDefaults;

impl DashboardDefaults {
    pub const GENRES: [&'static str; 3] = ["Action", "Horror", "Romance"];
    pub const REGIONS: [&'static str; 2] = ["United States of America", "India"];
    pub const YEAR_MIN: Year = 2011;
    pub const YEAR_MAX: Year = 2020;

    pub fn filter() -> FilterState {
        FilterState::new(
            Self::GENRES,
            Self::REGIONS,
            YearRange::new(Self::YEAR_MIN, Self::YEAR_MAX),
        )
    }

    pub fn inputs() -> DashboardInputs {
        DashboardInputs::new(Self::filter(), Metric::default(), TopN::default())
    }
}
