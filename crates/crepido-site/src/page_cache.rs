//! Rendered page caching.
//!
//! Provides a trait for page caching and implementations:
//! - [`PageCache`]: Trait for cache implementations
//! - [`NullPageCache`]: No-op cache (disabled caching)
//! - [`RenderCache`]: In-memory cache with age-based garbage collection

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Default age after which cached pages are collected.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(10 * 60);

/// Rendered page stored in the cache.
///
/// Entries are immutable: rendering the same board again replaces the entry.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// Cache key (resolved board path).
    pub key: String,
    /// Rendered HTML page.
    pub html: Arc<str>,
    /// When the page was rendered.
    pub timestamp: Instant,
}

impl CacheEntry {
    /// Age of the entry at `now`.
    #[must_use]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.timestamp)
    }
}

/// Trait for page caching implementations.
///
/// Implemented by both [`RenderCache`] (in-memory storage) and
/// [`NullPageCache`] (no-op).
pub trait PageCache: Send + Sync {
    /// Retrieve the latest entry stored for `key`.
    fn lookup(&self, key: &str) -> Option<CacheEntry>;

    /// Store a rendered page, replacing any entry for the same key.
    ///
    /// # Arguments
    /// * `key` - Resolved board path
    /// * `html` - Rendered HTML page
    /// * `now` - Render time, used for garbage collection
    fn insert(&self, key: &str, html: Arc<str>, now: Instant);

    /// Remove every entry at least as old as the maximum age.
    ///
    /// Returns the number of entries removed.
    fn collect_garbage(&self, now: Instant) -> usize;

    /// Number of cached pages.
    fn len(&self) -> usize;

    /// Whether the cache holds no pages.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// No-op cache implementation.
///
/// Always returns cache misses and discards stored content.
/// Use when caching is disabled.
#[derive(Debug, Default)]
pub struct NullPageCache;

impl PageCache for NullPageCache {
    fn lookup(&self, _key: &str) -> Option<CacheEntry> {
        None
    }

    fn insert(&self, _key: &str, _html: Arc<str>, _now: Instant) {}

    fn collect_garbage(&self, _now: Instant) -> usize {
        0
    }

    fn len(&self) -> usize {
        0
    }
}

/// In-memory render cache.
///
/// Holds at most one entry per key; the latest insert wins. Nothing expires
/// on its own: entries stay visible to [`lookup`](PageCache::lookup) until a
/// [`collect_garbage`](PageCache::collect_garbage) sweep removes them, so a
/// periodic driver is expected to call it.
#[derive(Debug)]
pub struct RenderCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    max_age: Duration,
}

impl RenderCache {
    /// Create an empty cache collecting entries older than `max_age`.
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_age,
        }
    }

    /// Age at which entries become eligible for collection.
    #[must_use]
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE)
    }
}

// Entries are replaced whole and never mutated, so a poisoned lock still
// guards a consistent map.
impl PageCache for RenderCache {
    fn lookup(&self, key: &str) -> Option<CacheEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key).cloned();
        tracing::debug!(key, hit = entry.is_some(), "Cache lookup");
        entry
    }

    fn insert(&self, key: &str, html: Arc<str>, now: Instant) {
        let entry = CacheEntry {
            key: key.to_owned(),
            html,
            timestamp: now,
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), entry);
        tracing::debug!(key, "Cached rendered board");
    }

    fn collect_garbage(&self, now: Instant) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.age(now) < self.max_age);
        let removed = before - entries.len();

        if removed > 0 {
            tracing::info!(removed, remaining = entries.len(), "Collected expired pages");
        }
        removed
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
