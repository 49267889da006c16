//! # Dashboard Orchestrator
//!
//! Coordinates one dashboard update:
//! 1. Diff the new inputs against the last published ones
//! 2. Work out the dirty nodes from the dependency graph
//! 3. Fetch the filtered view (cached by filter state)
//! 4. Recompute the dirty panels in parallel, reuse the clean ones
//! 5. Publish the snapshot, unless a newer update has started meanwhile
//!
//! The top-movie-per-region panel reads only the base table, so it is
//! computed once at construction and shared by every snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use data_loader::{BaseTable, RegionCode};
use pipeline::{filter, FilteredView};
use transforms::{
    distribution, ranking_with_policy, summarize, top_per_region, trend, Kpis, RankedActor,
    RankingPolicy, RatingDistribution, TopMovie, TrendSeries,
};

use crate::cache::ViewCache;
use crate::error::PanelError;
use crate::graph::{dirty_nodes, InputKind, Node};
use crate::inputs::DashboardInputs;

/// A panel value, or the reason it could not be computed
pub type PanelResult<T> = std::result::Result<Arc<T>, PanelError>;

/// Best movie per region code
pub type GeoPanel = BTreeMap<RegionCode, TopMovie>;

/// Every panel for one set of inputs
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub generation: u64,
    pub inputs: DashboardInputs,
    /// Rows in the filtered view behind the panels
    pub view_rows: usize,
    pub kpis: PanelResult<Kpis>,
    pub distribution: PanelResult<RatingDistribution>,
    pub trend: PanelResult<TrendSeries>,
    pub ranking: PanelResult<Vec<RankedActor>>,
    pub geo: Arc<GeoPanel>,
    /// Nodes recomputed by the update that produced this snapshot. A view
    /// served from the cache is not listed.
    pub recomputed: Vec<Node>,
}

impl DashboardSnapshot {
    /// Errors of the panels that failed
    pub fn errors(&self) -> Vec<&PanelError> {
        [
            self.kpis.as_ref().err(),
            self.distribution.as_ref().err(),
            self.trend.as_ref().err(),
            self.ranking.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Result of [`DashboardOrchestrator::update`]
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// This update is now the visible state
    Published(Arc<DashboardSnapshot>),
    /// A newer update started before this one finished; its result was dropped
    Superseded { generation: u64 },
}

impl UpdateOutcome {
    pub fn snapshot(&self) -> Option<&Arc<DashboardSnapshot>> {
        match self {
            UpdateOutcome::Published(snapshot) => Some(snapshot),
            UpdateOutcome::Superseded { .. } => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, UpdateOutcome::Superseded { .. })
    }
}

/// Run one panel computation on the blocking pool, turning a panic into
/// that panel's error.
pub(crate) async fn run_panel<T, F>(node: Node, compute: F) -> PanelResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(compute)
        .await
        .map(Arc::new)
        .map_err(|err| PanelError::from_join(node, err))
}

/// Reuse the previous value of a clean panel, recompute a dirty one. A
/// panel that failed last time is always recomputed.
async fn refresh<T, F>(
    node: Node,
    dirty: &[Node],
    previous: Option<&PanelResult<T>>,
    compute: F,
) -> PanelResult<T>
where
    T: Send + Sync + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match previous {
        Some(Ok(value)) if !dirty.contains(&node) => Ok(value.clone()),
        _ => run_panel(node, compute).await,
    }
}

pub struct DashboardOrchestrator {
    base: Arc<BaseTable>,
    geo: Arc<GeoPanel>,
    cache: ViewCache,
    ranking_policy: RankingPolicy,
    /// Generation of the most recently started update
    generation: AtomicU64,
    latest: Mutex<Option<Arc<DashboardSnapshot>>>,
}

impl DashboardOrchestrator {
    /// Create an orchestrator over `base`, computing the geo panel up front.
    pub async fn new(base: Arc<BaseTable>) -> Result<Self> {
        let start = Instant::now();
        let geo = tokio::task::spawn_blocking({
            let base = base.clone();
            move || top_per_region(&base)
        })
        .await
        .context("Geo task panicked")?;
        info!(
            "Computed top movie for {} regions in {:.2?}",
            geo.len(),
            start.elapsed()
        );

        Ok(Self {
            base,
            geo: Arc::new(geo),
            cache: ViewCache::default(),
            ranking_policy: RankingPolicy::default(),
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
        })
    }

    pub fn with_ranking_policy(mut self, policy: RankingPolicy) -> Self {
        self.ranking_policy = policy;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = ViewCache::new(capacity);
        self
    }

    pub fn base(&self) -> &Arc<BaseTable> {
        &self.base
    }

    pub fn geo(&self) -> &Arc<GeoPanel> {
        &self.geo
    }

    /// (hits, misses) of the filtered-view cache
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }

    /// The most recently published snapshot
    pub async fn snapshot(&self) -> Option<Arc<DashboardSnapshot>> {
        self.latest.lock().await.clone()
    }

    /// Recompute the dashboard for `inputs`.
    ///
    /// Returns `Superseded` when another update started after this one
    /// before it could publish. Errors only when the filtered view itself
    /// cannot be built; a failing panel is reported inside the snapshot.
    pub async fn update(&self, inputs: DashboardInputs) -> Result<UpdateOutcome> {
        let generation = self.next_generation();
        self.run_update(generation, inputs).await
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn run_update(&self, generation: u64, inputs: DashboardInputs) -> Result<UpdateOutcome> {
        let start_time = Instant::now();

        let previous = self.latest.lock().await.clone();
        let changed: BTreeSet<InputKind> = match &previous {
            Some(prev) => inputs.changed_since(&prev.inputs),
            None => InputKind::ALL.into_iter().collect(),
        };
        let dirty = dirty_nodes(&changed);
        debug!("Update {}: changed {:?}, dirty {:?}", generation, changed, dirty);

        let (view, cache_hit) = self.filtered_view(&inputs).await?;
        let mut recomputed = dirty.clone();
        if cache_hit {
            recomputed.retain(|node| *node != Node::FilteredView);
        }

        let prev = previous.as_deref();
        let policy = self.ranking_policy;
        let metric = inputs.metric;
        let top_n = inputs.top_n;
        let (kpis, distribution, trend, ranking) = tokio::join!(
            refresh(Node::Kpis, &dirty, prev.map(|p| &p.kpis), {
                let view = view.clone();
                move || summarize(&view)
            }),
            refresh(Node::Distribution, &dirty, prev.map(|p| &p.distribution), {
                let view = view.clone();
                move || distribution(&view)
            }),
            refresh(Node::Trend, &dirty, prev.map(|p| &p.trend), {
                let view = view.clone();
                move || trend(&view, metric)
            }),
            refresh(Node::Ranking, &dirty, prev.map(|p| &p.ranking), {
                let view = view.clone();
                move || ranking_with_policy(&view, top_n, policy)
            })
        );

        let mut latest = self.latest.lock().await;
        if !self.is_latest(generation) {
            debug!("Discarding stale update {}", generation);
            return Ok(UpdateOutcome::Superseded { generation });
        }

        let snapshot = Arc::new(DashboardSnapshot {
            generation,
            inputs,
            view_rows: view.len(),
            kpis,
            distribution,
            trend,
            ranking,
            geo: self.geo.clone(),
            recomputed,
        });
        for err in snapshot.errors() {
            warn!("Update {}: {}", generation, err);
        }
        *latest = Some(snapshot.clone());

        info!(
            "Published update {} ({} rows, recomputed {:?}) in {:.2?}",
            generation,
            snapshot.view_rows,
            snapshot.recomputed,
            start_time.elapsed()
        );
        Ok(UpdateOutcome::Published(snapshot))
    }

    /// The filtered view for `inputs`, from the cache when possible; the
    /// flag is true on a cache hit
    async fn filtered_view(&self, inputs: &DashboardInputs) -> Result<(FilteredView, bool)> {
        if let Some(view) = self.cache.get(&inputs.filter) {
            debug!("Filtered view cache hit ({} rows)", view.len());
            return Ok((view, true));
        }

        let view = tokio::task::spawn_blocking({
            let base = self.base.clone();
            let state = inputs.filter.clone();
            move || filter(&base, &state)
        })
        .await
        .context("Filter task panicked")?;

        self.cache.insert(inputs.filter.clone(), view.clone());
        Ok((view, false))
    }
}
