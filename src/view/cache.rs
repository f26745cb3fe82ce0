//! Compiled-view cache for production mode.
//!
//! Compiling a template is the expensive step of resolution, so production
//! mode keeps every compiled view for the lifetime of its resolver.
//!
//! # Cache Policy
//!
//! - Keyed by view name, unbounded, populated lazily
//! - No eviction and no invalidation; entries are immutable values
//! - Shared by all threads calling the owning resolver
//!
//! # Concurrency
//!
//! Compilation happens outside the map. Two threads missing on the same name
//! may both compile, but [`ViewCache::insert`] keeps the first stored
//! instance and hands it back to every later writer, so callers converge on
//! one canonical `Arc` per name.

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::CompiledView;

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: usize,
    /// Lookups that found nothing cached
    pub misses: usize,
    /// Number of cached views
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as a percentage of all lookups.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Name-keyed store of compiled views.
#[derive(Debug, Default)]
pub struct ViewCache {
    views: DashMap<String, Arc<CompiledView>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ViewCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached view, counting the hit or miss.
    pub fn get(&self, name: &str) -> Option<Arc<CompiledView>> {
        let cached = self.views.get(name).map(|entry| Arc::clone(entry.value()));
        if cached.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        cached
    }

    /// Store a freshly compiled view and return the canonical instance.
    ///
    /// If another thread stored a view under `name` first, that instance is
    /// returned and `view` is dropped.
    pub fn insert(&self, name: &str, view: Arc<CompiledView>) -> Arc<CompiledView> {
        let entry = self.views.entry(name.to_string()).or_insert(view);
        Arc::clone(entry.value())
    }

    /// Whether a view is cached under `name`. Does not touch the counters.
    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    /// Number of cached views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.views.len(),
        }
    }
}
