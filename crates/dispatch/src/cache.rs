use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

/// A single cached template identifier.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    /// Returns `true` if this entry has passed its TTL deadline.
    fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Concurrent cache of resolved template identifiers, keyed by logical
/// template name.
///
/// The default cache holds entries for the life of the process; provider
/// template identifiers change only on redeploys, which restart the
/// dispatcher anyway. A TTL can be injected to get lazy per-entry expiry
/// instead. Entries are evicted on read, never by a background task.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: DashMap<String, Entry>,
    ttl: Option<Duration>,
}

impl TemplateCache {
    /// Create a cache whose entries never expire.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache whose entries lazily expire after `ttl`.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Some(ttl),
        }
    }

    /// Look up a cached identifier, evicting it first if it has expired.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        if let Some(entry) = self.entries.get(name) {
            if entry.is_expired() {
                drop(entry);
                self.entries.remove(name);
                return None;
            }
            return Some(entry.value.clone());
        }
        None
    }

    /// Store a resolved identifier. Overwrites any previous entry and
    /// restarts its TTL clock.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        let expires_at = self.ttl.map(|d| Instant::now() + d);
        self.entries.insert(
            name.into(),
            Entry {
                value: value.into(),
                expires_at,
            },
        );
    }

    /// Number of cached entries, including any not yet lazily evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let cache = TemplateCache::new();
        assert!(cache.get("welcome.html").is_none());

        cache.insert("welcome.html", "d-123");
        assert_eq!(cache.get("welcome.html").as_deref(), Some("d-123"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_overwrites() {
        let cache = TemplateCache::new();
        cache.insert("welcome.html", "d-123");
        cache.insert("welcome.html", "d-456");
        assert_eq!(cache.get("welcome.html").as_deref(), Some("d-456"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn default_entries_survive_time_passing() {
        let cache = TemplateCache::new();
        cache.insert("welcome.html", "d-123");

        tokio::time::advance(Duration::from_secs(86_400 * 365)).await;

        assert_eq!(cache.get("welcome.html").as_deref(), Some("d-123"));
    }

    #[tokio::test(start_paused = true)]
    async fn ttl_entries_lazily_evict() {
        let cache = TemplateCache::with_ttl(Duration::from_secs(60));
        cache.insert("welcome.html", "d-123");

        // Still live before the deadline.
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(cache.get("welcome.html").as_deref(), Some("d-123"));

        // Past the deadline the entry is evicted on read.
        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(cache.get("welcome.html").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reinsert_restarts_ttl() {
        let cache = TemplateCache::with_ttl(Duration::from_secs(60));
        cache.insert("welcome.html", "d-123");

        tokio::time::advance(Duration::from_secs(45)).await;
        cache.insert("welcome.html", "d-123");

        // 45s + 30s is past the original deadline but not the restarted one.
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(cache.get("welcome.html").as_deref(), Some("d-123"));
    }
}
