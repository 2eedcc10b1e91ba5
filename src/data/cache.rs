//! Sample Cache
//!
//! Memoizes generated sample tables so every render pass of a session sees
//! the same data.
//!
//! Entries are keyed on generator identity, generation parameters and the
//! session id, so sessions never share a table. The cache holds at most
//! `capacity` entries; inserting into a full cache evicts the oldest
//! inserted entry first (FIFO). Nothing expires on time.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::DataResult;
use super::sample::{generate, rng_for, SampleSeries, GENERATOR_NAME};

/// Cache key for one generated table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleKey {
    pub generator: &'static str,
    pub year: i32,
    pub seed: Option<u64>,
    pub session: String,
}

impl SampleKey {
    /// Key for the daily sales generator
    pub fn new(year: i32, seed: Option<u64>, session: impl Into<String>) -> Self {
        Self {
            generator: GENERATOR_NAME,
            year,
            seed,
            session: session.into(),
        }
    }
}

/// Cache counters
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<SampleKey, Arc<SampleSeries>>,
    /// Insertion order, oldest first
    order: VecDeque<SampleKey>,
}

/// Bounded FIFO memoization of sample tables
pub struct SampleCache {
    inner: RwLock<CacheInner>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl SampleCache {
    /// Create a cache holding at most `capacity` tables (minimum 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Return the cached table for `key`, generating it on first use
    pub async fn get_or_generate(&self, key: &SampleKey) -> DataResult<Arc<SampleSeries>> {
        if let Some(series) = self.inner.read().await.entries.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(session = %key.session, year = key.year, "Sample cache hit");
            return Ok(Arc::clone(series));
        }

        let mut inner = self.inner.write().await;

        // Another request may have filled the slot while we waited
        if let Some(series) = inner.entries.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(series));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let series = Arc::new(generate(key.year, &mut rng_for(key.seed))?);

        while inner.entries.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            self.evictions.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(session = %oldest.session, "Evicted sample table");
        }

        inner.order.push_back(key.clone());
        inner.entries.insert(key.clone(), Arc::clone(&series));

        tracing::debug!(
            session = %key.session,
            year = key.year,
            rows = series.len(),
            "Generated sample table"
        );

        Ok(series)
    }

    /// Drop every entry
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.order.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.inner.read().await.entries.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_key_returns_same_table() {
        let cache = SampleCache::new(4);
        let key = SampleKey::new(2024, None, "session-a");

        let first = cache.get_or_generate(&key).await.unwrap();
        let second = cache.get_or_generate(&key).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_entries() {
        let cache = SampleCache::new(4);
        let a = cache
            .get_or_generate(&SampleKey::new(2024, None, "a"))
            .await
            .unwrap();
        let b = cache
            .get_or_generate(&SampleKey::new(2024, None, "b"))
            .await
            .unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats().await.entries, 2);
    }

    #[tokio::test]
    async fn test_seeded_entries_are_reproducible() {
        let cache = SampleCache::new(4);
        let a = cache
            .get_or_generate(&SampleKey::new(2024, Some(9), "a"))
            .await
            .unwrap();
        let b = cache
            .get_or_generate(&SampleKey::new(2024, Some(9), "b"))
            .await
            .unwrap();
        assert_eq!(a.rows, b.rows);
    }

    #[tokio::test]
    async fn test_full_cache_evicts_oldest() {
        let cache = SampleCache::new(2);
        let k1 = SampleKey::new(2024, Some(1), "s1");
        let k2 = SampleKey::new(2024, Some(1), "s2");
        let k3 = SampleKey::new(2024, Some(1), "s3");

        let first = cache.get_or_generate(&k1).await.unwrap();
        cache.get_or_generate(&k2).await.unwrap();
        cache.get_or_generate(&k3).await.unwrap();

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.evictions, 1);

        // k1 was evicted, so it is generated again
        let again = cache.get_or_generate(&k1).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &again));
        assert_eq!(cache.stats().await.misses, 4);
    }

    #[tokio::test]
    async fn test_invalid_year_is_not_cached() {
        let cache = SampleCache::new(2);
        let key = SampleKey::new(i32::MAX, None, "s");
        assert!(cache.get_or_generate(&key).await.is_err());
        assert_eq!(cache.stats().await.entries, 0);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = SampleCache::new(2);
        cache
            .get_or_generate(&SampleKey::new(2024, None, "s"))
            .await
            .unwrap();
        cache.clear().await;
        assert_eq!(cache.stats().await.entries, 0);
    }
}
