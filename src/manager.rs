//! Path Manager Module
//!
//! Owns one path cache per mover category and routes queries through them
//! before falling back to the search component.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheKey, CacheStats, InsertOutcome, Path, PathCache, SearchResult};
use crate::config::CacheConfig;

// == Path Search ==
/// The search component consulted on a cache miss.
pub trait PathSearch {
    fn search(&mut self, key: &CacheKey) -> (Path, SearchResult);
}

// == Path Manager ==
/// Routes path queries through per-category caches.
///
/// Each mover category gets its own cache, created on first use, so no
/// cache is ever shared between categories.
#[derive(Debug)]
pub struct PathManager<S> {
    search: S,
    config: CacheConfig,
    caches: HashMap<u32, PathCache>,
}

impl<S: PathSearch> PathManager<S> {
    // == Constructor ==
    pub fn new(search: S, config: CacheConfig) -> Self {
        Self {
            search,
            config,
            caches: HashMap::new(),
        }
    }

    // == Find Path ==
    /// Answers `key` from the cache, or runs the search and caches a
    /// successful result.
    pub fn find_path(&mut self, key: CacheKey, current_tick: u64) -> (Path, SearchResult) {
        let config = &self.config;
        let cache = self
            .caches
            .entry(key.mover_category)
            .or_insert_with(|| PathCache::from_config(config));

        if let Some(entry) = cache.lookup(&key) {
            return (entry.path.clone(), entry.result);
        }

        let (path, result) = self.search.search(&key);

        if result.is_success() {
            let outcome = cache.insert(key, &path, result, current_tick);
            if outcome != InsertOutcome::Inserted {
                debug!(?outcome, ?key, "search result not cached");
            }
        }

        (path, result)
    }

    // == Update ==
    /// Prunes every cache. Call once per simulation tick.
    pub fn update(&mut self, current_tick: u64) -> usize {
        self.caches
            .values_mut()
            .map(|cache| cache.prune(current_tick))
            .sum()
    }

    // == Stats ==
    /// Statistics for one mover category, if it has been queried.
    pub fn stats(&self, mover_category: u32) -> Option<CacheStats> {
        self.caches.get(&mover_category).map(PathCache::stats)
    }

    /// Statistics summed over all categories.
    pub fn total_stats(&self) -> CacheStats {
        self.caches
            .values()
            .fold(CacheStats::new(), |mut total, cache| {
                total.merge(&cache.stats());
                total
            })
    }

    pub fn search(&self) -> &S {
        &self.search
    }
}
