//! Bounded cache of filtered views keyed by filter state.
//!
//! Filtering is the only scan over the full base table, and users toggle
//! back and forth between a few selections. Entries are evicted least
//! recently used first.

use lru::LruCache;
use pipeline::{FilterState, FilteredView};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const DEFAULT_CAPACITY: usize = 32;

pub struct ViewCache {
    /// `None` when caching is disabled
    views: Option<Mutex<LruCache<FilterState, FilteredView>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ViewCache {
    /// A cache holding at most `capacity` views; 0 disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            views: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, LruCache<FilterState, FilteredView>>> {
        // A cached view is immutable, so a poisoned lock still holds valid entries
        self.views
            .as_ref()
            .map(|views| views.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn get(&self, state: &FilterState) -> Option<FilteredView> {
        let cached = self.lock().and_then(|mut views| views.get(state).cloned());
        let counter = if cached.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        cached
    }

    pub fn insert(&self, state: FilterState, view: FilteredView) {
        let Some(mut views) = self.lock() else {
            return;
        };
        if let Some((evicted, _)) = views.push(state.clone(), view) {
            if evicted != state {
                tracing::debug!("Evicted filtered view for {:?}", evicted);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map_or(0, |views| views.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (hits, misses) since construction
    pub fn stats(&self) -> (u64, u64) {
        (self.hits.load(Ordering::Relaxed), self.misses.load(Ordering::Relaxed))
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::BaseTable;
    use pipeline::YearRange;
    use std::sync::Arc;

    fn state(year: u16) -> FilterState {
        FilterState::new(["Action"], ["India"], YearRange::new(year, year))
    }

    fn view() -> FilteredView {
        FilteredView::empty(Arc::new(BaseTable::default()))
    }

    #[test]
    fn test_get_after_insert() {
        let cache = ViewCache::new(4);
        assert!(cache.get(&state(2011)).is_none());
        cache.insert(state(2011), view());
        assert!(cache.get(&state(2011)).is_some());
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = ViewCache::new(2);
        cache.insert(state(2011), view());
        cache.insert(state(2012), view());
        // 2011 becomes most recent, so 2012 goes first
        assert!(cache.get(&state(2011)).is_some());
        cache.insert(state(2013), view());

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&state(2012)).is_none());
        assert!(cache.get(&state(2011)).is_some());
        assert!(cache.get(&state(2013)).is_some());
    }

    #[test]
    fn test_reinsert_does_not_grow() {
        let cache = ViewCache::new(2);
        cache.insert(state(2011), view());
        cache.insert(state(2011), view());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let cache = ViewCache::new(0);
        cache.insert(state(2011), view());
        assert!(cache.is_empty());
        assert!(cache.get(&state(2011)).is_none());
    }
}
