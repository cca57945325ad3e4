//! TTL cache for fetched verified source text
//!
//! Source text barely changes once a contract is verified, but explorer
//! APIs are slow and rate-limited, so hits are worth real latency. Keyed
//! by lowercase address; each configured source client owns its own cache,
//! so differently-configured endpoints never share entries.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::models::types::SourceText;

const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Clone, Debug)]
struct CacheEntry {
    source: SourceText,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// Thread-safe source-text cache with TTL expiration.
#[derive(Clone)]
pub struct SourceCache {
    store: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Default for SourceCache {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }
}

impl SourceCache {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            ttl,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    #[inline]
    fn normalize_address(address: &str) -> String {
        address.to_lowercase()
    }

    pub fn get(&self, address: &str) -> Option<SourceText> {
        let key = Self::normalize_address(address);

        if let Some(entry) = self.store.get(&key) {
            if entry.is_expired() {
                drop(entry); // release read lock before removing
                self.store.remove(&key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("source cache miss (expired): {}", key);
                None
            } else {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("source cache hit: {}", key);
                Some(entry.source.clone())
            }
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("source cache miss: {}", key);
            None
        }
    }

    pub fn set(&self, address: &str, source: SourceText) {
        let key = Self::normalize_address(address);
        self.store.insert(
            key,
            CacheEntry {
                source,
                created_at: Instant::now(),
                ttl: self.ttl,
            },
        );
    }

    /// Drop all expired entries; returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let before = self.store.len();
        self.store.retain(|_, entry| !entry.is_expired());
        before - self.store.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.store.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics for the stats endpoint.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verified() -> SourceText {
        SourceText::Verified("contract Token {}".to_string())
    }

    #[test]
    fn test_set_get() {
        let cache = SourceCache::default();
        cache.set("0xdAC17F958D2ee523a2206206994597C13D831ec7", verified());
        assert!(cache
            .get("0xdAC17F958D2ee523a2206206994597C13D831ec7")
            .is_some());
    }

    #[test]
    fn test_address_normalization() {
        let cache = SourceCache::default();
        cache.set("0xDAC17F958D2EE523A2206206994597C13D831EC7", verified());
        assert!(cache
            .get("0xdac17f958d2ee523a2206206994597c13d831ec7")
            .is_some());
    }

    #[test]
    fn test_expiry() {
        let cache = SourceCache::with_ttl(Duration::from_millis(0));
        cache.set("0xabc", verified());
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("0xabc").is_none());
    }

    #[test]
    fn test_cleanup_expired() {
        let cache = SourceCache::with_ttl(Duration::from_millis(0));
        cache.set("0xabc", verified());
        cache.set("0xdef", verified());
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.cleanup_expired(), 2);
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_stats() {
        let cache = SourceCache::default();
        cache.set("0xabc", verified());
        cache.get("0xabc"); // hit
        cache.get("0xdef"); // miss

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
