//! In-memory cache of listings keyed by query.

use super::pages::TickerPages;
use super::query::TickerQuery;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Entries younger than this are served without refetching.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);
/// Entries unused for this long are dropped.
pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    pages: TickerPages,
    updated_at: Instant,
    last_used: Instant,
}

/// Listing cache with stale and garbage-collection windows.
#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<TickerQuery, CacheEntry>,
    stale_time: Duration,
    gc_time: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME, DEFAULT_GC_TIME)
    }
}

impl QueryCache {
    pub fn new(stale_time: Duration, gc_time: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stale_time,
            gc_time,
        }
    }

    /// Pages for `query` if they are still fresh at `now`.
    pub fn get_fresh(&mut self, query: &TickerQuery, now: Instant) -> Option<&TickerPages> {
        let stale_time = self.stale_time;
        let entry = self.entries.get_mut(query)?;
        if now.saturating_duration_since(entry.updated_at) > stale_time {
            return None;
        }
        entry.last_used = now;
        Some(&entry.pages)
    }

    /// Store the pages loaded so far for `query`.
    pub fn insert(&mut self, query: TickerQuery, pages: TickerPages, now: Instant) {
        self.entries.insert(
            query,
            CacheEntry {
                pages,
                updated_at: now,
                last_used: now,
            },
        );
    }

    /// Invalidate one query.
    pub fn remove(&mut self, query: &TickerQuery) {
        self.entries.remove(query);
    }

    /// Drop every cached listing.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries unused for longer than the GC window.
    pub fn collect_garbage(&mut self, now: Instant) -> usize {
        let gc_time = self.gc_time;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.last_used) <= gc_time);
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(removed, "Evicted cached listings");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TickersResponse;

    fn pages() -> TickerPages {
        TickerPages::from(vec![TickersResponse::default()])
    }

    #[test]
    fn test_fresh_entry_is_served() {
        let mut cache = QueryCache::default();
        let query = TickerQuery::explore("AAPL", 50);
        let now = Instant::now();

        cache.insert(query.clone(), pages(), now);
        assert!(cache.get_fresh(&query, now + Duration::from_secs(60)).is_some());
        assert!(cache.get_fresh(&TickerQuery::explore("MSFT", 50), now).is_none());
    }

    #[test]
    fn test_stale_entry_is_not_served() {
        let mut cache = QueryCache::default();
        let query = TickerQuery::explore("AAPL", 50);
        let now = Instant::now();

        cache.insert(query.clone(), pages(), now);
        assert!(cache.get_fresh(&query, now + Duration::from_secs(301)).is_none());
    }

    #[test]
    fn test_garbage_collection() {
        let mut cache = QueryCache::default();
        let now = Instant::now();
        cache.insert(TickerQuery::explore("A", 50), pages(), now);
        cache.insert(TickerQuery::explore("B", 50), pages(), now + Duration::from_secs(400));

        let removed = cache.collect_garbage(now + Duration::from_secs(601));
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cache = QueryCache::default();
        let now = Instant::now();
        let query = TickerQuery::explore("A", 50);
        cache.insert(query.clone(), pages(), now);
        cache.insert(TickerQuery::explore("B", 50), pages(), now);

        cache.remove(&query);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
