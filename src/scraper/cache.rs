//! Per-URL cache of successful scrape results.
//!
//! Failed scrapes are never cached, so a transient upstream outage does
//! not pin an empty result for the full window.

use crate::scraper::ScrapeResult;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct ScrapeCache {
    store: Arc<DashMap<String, CacheEntry>>,
    ttl_seconds: i64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    result: ScrapeResult,
    cached_at: DateTime<Utc>,
}

impl ScrapeCache {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            ttl_seconds,
        }
    }

    /// Fresh cached result for a URL. Stale entries are evicted lazily
    /// on lookup.
    pub fn get(&self, url: &str) -> Option<ScrapeResult> {
        let entry = self.store.get(url)?;
        let stale = Utc::now().signed_duration_since(entry.cached_at)
            >= Duration::seconds(self.ttl_seconds);
        if stale {
            // guard must drop before removing from the same shard
            drop(entry);
            self.store.remove(url);
            return None;
        }
        Some(entry.result.clone())
    }

    pub fn insert(&self, url: &str, result: ScrapeResult) {
        self.store.insert(
            url.to_string(),
            CacheEntry {
                result,
                cached_at: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_titled(title: &str) -> ScrapeResult {
        ScrapeResult {
            title: title.to_string(),
            author: String::new(),
            summary: String::new(),
            thumbnail: String::new(),
            resource_type: None,
            duration: None,
            suggested_tags: Vec::new(),
        }
    }

    #[test]
    fn caches_and_returns_within_ttl() {
        let cache = ScrapeCache::new(3600);
        cache.insert("https://example.com", result_titled("hit"));
        let cached = cache.get("https://example.com").unwrap();
        assert_eq!(cached.title, "hit");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_ttl_expires_immediately_and_evicts() {
        let cache = ScrapeCache::new(0);
        cache.insert("https://example.com", result_titled("gone"));
        assert!(cache.get("https://example.com").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn distinct_urls_do_not_collide() {
        let cache = ScrapeCache::new(3600);
        cache.insert("https://a.example", result_titled("a"));
        cache.insert("https://b.example", result_titled("b"));
        assert_eq!(cache.get("https://a.example").unwrap().title, "a");
        assert_eq!(cache.get("https://b.example").unwrap().title, "b");
        assert!(cache.get("https://c.example").is_none());
    }
}
