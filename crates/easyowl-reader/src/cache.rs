//! Memoized similarity rankings.
//!
//! Ranking a query scores every candidate string, so repeated lookups of the
//! same query are served from a bounded, expiring LRU map instead.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::config::CacheConfig;
use crate::similarity::SimilarMatch;

#[derive(Debug)]
struct Ranked {
    matches: Vec<SimilarMatch>,
    stored_at: Instant,
}

impl Ranked {
    fn is_stale(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() > ttl
    }
}

/// Bounded store of ranked results keyed by [`similarity_cache_key`].
///
/// Holds at most `max_entries` rankings and forgets the least recently read
/// one when full. A ranking older than `ttl` counts as a miss and is dropped
/// on lookup.
///
/// # Example
///
/// ```rust
/// use easyowl_reader::{similarity_cache_key, QueryCache, SimilarMatch};
/// use std::time::Duration;
///
/// let cache = QueryCache::with_capacity(10, Duration::from_secs(60));
/// let key = similarity_cache_key("Heart  Disease", Some(1), None);
/// cache.set(key.clone(), vec![SimilarMatch {
///     identifier: "A".into(),
///     matched_label: "Heart Disease".into(),
///     score: 1.0,
/// }]);
/// assert_eq!(cache.get(&key).unwrap()[0].identifier, "A");
/// ```
#[derive(Debug)]
pub struct QueryCache {
    rankings: Mutex<LruCache<String, Ranked>>,
    ttl: Duration,
}

impl QueryCache {
    /// Creates a cache from its configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_capacity(config.max_entries, config.ttl)
    }

    /// Creates a cache holding up to `max_entries` rankings (at least one).
    pub fn with_capacity(max_entries: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            rankings: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Returns the stored ranking for `key` unless it is missing or stale.
    pub fn get(&self, key: &str) -> Option<Vec<SimilarMatch>> {
        let mut rankings = self.rankings.lock().ok()?;
        let stale = rankings.get(key)?.is_stale(self.ttl);
        if stale {
            rankings.pop(key);
            return None;
        }
        rankings.get(key).map(|ranked| ranked.matches.clone())
    }

    /// Stores a ranking under `key`, replacing any previous one.
    pub fn set(&self, key: String, matches: Vec<SimilarMatch>) {
        if let Ok(mut rankings) = self.rankings.lock() {
            rankings.put(
                key,
                Ranked {
                    matches,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    /// Number of stored rankings, stale ones included.
    pub fn len(&self) -> usize {
        self.rankings.lock().map_or(0, |rankings| rankings.len())
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every ranking.
    pub fn clear(&self) {
        if let Ok(mut rankings) = self.rankings.lock() {
            rankings.clear();
        }
    }

    /// Counts stored and stale rankings.
    pub fn stats(&self) -> CacheStats {
        let Ok(rankings) = self.rankings.lock() else {
            return CacheStats::default();
        };
        let total_entries = rankings.len();
        let expired_entries = rankings
            .iter()
            .filter(|(_, ranked)| ranked.is_stale(self.ttl))
            .count();
        CacheStats {
            total_entries,
            expired_entries,
            valid_entries: total_entries - expired_entries,
        }
    }
}

/// Snapshot of a [`QueryCache`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Stored rankings.
    pub total_entries: usize,
    /// Rankings past their TTL that have not been looked up since.
    pub expired_entries: usize,
    /// Rankings still servable.
    pub valid_entries: usize,
}

/// Collapses runs of whitespace, trims, and lowercases a query.
///
/// Queries that tokenize identically map to the same key.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Builds the cache key for one similarity call.
pub fn similarity_cache_key(query: &str, n: Option<usize>, threshold: Option<f64>) -> String {
    let n = n.map_or_else(|| "all".to_string(), |n| n.to_string());
    let threshold = threshold.map_or_else(|| "none".to_string(), |t| t.to_string());
    format!("{}|n={n}|t={threshold}", normalize_query(query))
}
