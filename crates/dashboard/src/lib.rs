//! Reactive recomputation for the IMDb dashboard.
//!
//! This crate wires the filter and the panel transforms into a dependency
//! graph and keeps the latest consistent set of panels:
//! - **graph**: nodes, their declared inputs, and dirty-set propagation
//! - **inputs**: the user-controlled inputs and the initial selection
//! - **cache**: bounded filtered-view cache keyed by filter state
//! - **orchestrator**: parallel recomputation and stale-result discarding
//!
//! ## Example Usage
//! ```ignore
//! use dashboard::{DashboardInputs, DashboardOrchestrator, UpdateOutcome};
//!
//! let orchestrator = DashboardOrchestrator::new(base).await?;
//! if let UpdateOutcome::Published(snapshot) = orchestrator.update(DashboardInputs::default()).await? {
//!     println!("{:?}", snapshot.kpis);
//! }
//! ```

pub mod error;
pub mod graph;
pub mod inputs;
pub mod cache;
pub mod orchestrator;

pub use error::PanelError;
pub use graph::{dirty_nodes, InputKind, Node};
pub use inputs::{DashboardDefaults, DashboardInputs};
pub use cache::ViewCache;
pub use orchestrator::{DashboardOrchestrator, DashboardSnapshot, GeoPanel, PanelResult, UpdateOutcome};
