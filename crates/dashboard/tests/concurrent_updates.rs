//! Concurrent updates against one orchestrator: only the newest result may
//! become visible.

use dashboard::{DashboardInputs, DashboardOrchestrator, UpdateOutcome};
use data_loader::{BaseTable, MovieRow};
use pipeline::YearRange;
use std::sync::Arc;

fn create_test_base() -> Arc<BaseTable> {
    let mut rows = Vec::new();
    for year in 2011..=2020u16 {
        for (code, name) in [("US", "United States of America"), ("IN", "India")] {
            for genre in ["Action", "Horror", "Romance", "Drama"] {
                rows.push(MovieRow {
                    title: format!("{} {} {}", genre, code, year),
                    actor_name: format!("Actor {}", year % 5),
                    genre: genre.to_string(),
                    start_year: year,
                    runtime_minutes: if year % 4 == 0 { None } else { Some(100.0) },
                    average_rating: 3.0 + (year % 7) as f64,
                    region_code: code.to_string(),
                    region_name: name.to_string(),
                });
            }
        }
    }
    Arc::new(BaseTable::from_rows(rows))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_newest_update_wins() {
    let orchestrator = Arc::new(DashboardOrchestrator::new(create_test_base()).await.unwrap());

    let mut handles = Vec::new();
    for i in 0..8u16 {
        let orchestrator = orchestrator.clone();
        let mut inputs = DashboardInputs::default();
        inputs.filter.year_range = YearRange::new(2011, 2012 + i);
        handles.push(tokio::spawn(async move { orchestrator.update(inputs).await }));
    }

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap().unwrap());
    }

    let published: Vec<_> = outcomes.iter().filter_map(UpdateOutcome::snapshot).collect();
    assert!(!published.is_empty());

    // Generation 8 can never be superseded, so it is what stays visible
    let latest = orchestrator.snapshot().await.unwrap();
    assert_eq!(latest.generation, 8);
    let newest = published
        .iter()
        .find(|s| s.generation == 8)
        .expect("newest update must publish");
    assert_eq!(latest.inputs, newest.inputs);
    assert!(latest.errors().is_empty());
}

#[tokio::test]
async fn test_geo_is_shared_across_selections() {
    let orchestrator = DashboardOrchestrator::new(create_test_base()).await.unwrap();

    let wide = orchestrator.update(DashboardInputs::default()).await.unwrap();
    let mut narrow_inputs = DashboardInputs::default();
    narrow_inputs.filter.regions.remove("India");
    narrow_inputs.filter.year_range = YearRange::new(2019, 2019);
    let narrow = orchestrator.update(narrow_inputs).await.unwrap();

    let wide = wide.snapshot().unwrap();
    let narrow = narrow.snapshot().unwrap();
    assert_ne!(wide.view_rows, narrow.view_rows);
    assert!(Arc::ptr_eq(&wide.geo, &narrow.geo));
    assert_eq!(**orchestrator.geo(), *wide.geo);
}
