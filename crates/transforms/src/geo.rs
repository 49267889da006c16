//! Highest-rated movie per region for the map panel.
//!
//! This transform reads the whole base table. The filter selection does not
//! apply to it, so the map shows the same movies whatever is selected.

use data_loader::{BaseTable, MovieRow, RegionCode};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMovie {
    pub title: String,
    pub average_rating: f64,
    pub region_name: String,
}

/// True when `candidate` should replace `current`: higher rating, or the
/// same rating and a smaller title.
fn outranks(candidate: &MovieRow, current: &MovieRow) -> bool {
    match candidate.average_rating.total_cmp(&current.average_rating) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Equal => candidate.title < current.title,
        std::cmp::Ordering::Less => false,
    }
}

/// One entry per region code in `base`, holding its best-rated movie.
pub fn top_per_region(base: &BaseTable) -> BTreeMap<RegionCode, TopMovie> {
    let mut best: BTreeMap<&str, &MovieRow> = BTreeMap::new();
    for row in base.rows() {
        match best.entry(row.region_code.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
            Entry::Occupied(mut slot) => {
                if outranks(row, slot.get()) {
                    slot.insert(row);
                }
            }
        }
    }

    tracing::debug!("Top movie per region over {} rows: {} regions", base.len(), best.len());

    best.into_iter()
        .map(|(code, row)| {
            (
                code.to_string(),
                TopMovie {
                    title: row.title.clone(),
                    average_rating: row.average_rating,
                    region_name: row.region_name.clone(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, code: &str, name: &str, rating: f64) -> MovieRow {
        MovieRow {
            title: title.to_string(),
            actor_name: "Ann Lee".to_string(),
            genre: "Romance".to_string(),
            start_year: 2012,
            runtime_minutes: None,
            average_rating: rating,
            region_code: code.to_string(),
            region_name: name.to_string(),
        }
    }

    #[test]
    fn test_best_movie_per_region() {
        let base = BaseTable::from_rows(vec![
            row("Low", "US", "United States of America", 5.0),
            row("High", "US", "United States of America", 8.5),
            row("Only", "IN", "India", 6.0),
        ]);
        let top = top_per_region(&base);

        assert_eq!(top.len(), 2);
        assert_eq!(top["US"].title, "High");
        assert_eq!(top["IN"].region_name, "India");
        assert_eq!(top["IN"].average_rating, 6.0);
    }

    #[test]
    fn test_rating_ties_break_on_title() {
        let base = BaseTable::from_rows(vec![
            row("Zebra", "FR", "France", 7.7),
            row("Apple", "FR", "France", 7.7),
            row("Mango", "FR", "France", 7.7),
        ]);
        assert_eq!(top_per_region(&base)["FR"].title, "Apple");
    }

    #[test]
    fn test_empty_base_gives_empty_map() {
        assert!(top_per_region(&BaseTable::default()).is_empty());
    }
}
