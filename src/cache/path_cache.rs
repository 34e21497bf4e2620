//! Path Cache Module
//!
//! Facade combining the entry store and expiry queue: inserts with collision
//! handling, verified lookups, per-tick pruning and capacity eviction.

use tracing::{debug, error, info};

use crate::cache::{
    CacheEntry, CacheKey, CacheStats, EntryStore, ExpiryQueue, GridHasher, KeyHasher, Path,
    SearchResult,
};
use crate::config::CacheConfig;

// == Insert Outcome ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Slot owned by a different query; the existing entry is kept
    CollisionRejected,
    /// Same query already cached; the first entry stays authoritative
    DuplicateIgnored,
}

impl InsertOutcome {
    pub fn is_collision(self) -> bool {
        self == InsertOutcome::CollisionRejected
    }
}

// == Path Cache ==
/// Bounded, tick-windowed cache of path search results.
///
/// Not thread-safe on its own; one instance is owned by one simulation
/// subsystem (see [`crate::manager::PathManager`]) or wrapped in a mutex
/// (see [`crate::tasks::SharedPathCache`]).
#[derive(Debug)]
pub struct PathCache<H = GridHasher> {
    hasher: H,
    entries: EntryStore,
    queue: ExpiryQueue,
    stats: CacheStats,
    /// Maximum number of queued records
    capacity: usize,
    /// Ticks an entry lives before pruning may drop it
    timeout_ticks: u64,
}

impl PathCache<GridHasher> {
    // == Constructor ==
    /// Creates a cache for the grid and limits described by `config`.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_hasher(
            GridHasher::new(config.blocks_x, config.blocks_z),
            config.capacity,
            config.timeout_ticks,
        )
    }
}

impl<H: KeyHasher> PathCache<H> {
    /// Creates a cache with an explicit hasher. A zero capacity is raised to 1.
    pub fn with_hasher(hasher: H, capacity: usize, timeout_ticks: u64) -> Self {
        Self {
            hasher,
            entries: EntryStore::new(),
            queue: ExpiryQueue::new(),
            stats: CacheStats::new(),
            capacity: capacity.max(1),
            timeout_ticks,
        }
    }

    // == Insert ==
    /// Caches a copy of `path` for `key`, expiring `timeout_ticks` after
    /// `current_tick`.
    ///
    /// The capacity check runs first and regardless of the outcome, so the
    /// queue never holds more than `capacity` records.
    pub fn insert(
        &mut self,
        key: CacheKey,
        path: &Path,
        result: SearchResult,
        current_tick: u64,
    ) -> InsertOutcome {
        while self.queue.len() >= self.capacity {
            self.remove_front();
            self.stats.record_eviction();
        }

        let hash = self.hasher.hash(&key);

        if let Some(existing) = self.entries.get(hash) {
            if existing.key.same_query(&key) {
                return InsertOutcome::DuplicateIgnored;
            }

            self.stats.record_collision();
            debug!(
                hash,
                ?key,
                existing = ?existing.key,
                "path cache hash collision, insert rejected"
            );
            return InsertOutcome::CollisionRejected;
        }

        let inserted = self
            .entries
            .insert_if_absent(hash, CacheEntry::new(key, path, result));
        debug_assert!(inserted, "vacant slot {hash} reported occupied");

        self.queue
            .push_back(hash, current_tick.saturating_add(self.timeout_ticks));
        self.stats.set_total_entries(self.entries.len());

        InsertOutcome::Inserted
    }

    // == Lookup ==
    /// Returns the cached entry answering `key`, if any.
    ///
    /// Verifies start cell, goal cell and mover category. Goal radius feeds
    /// the hash but is not compared here, so a radius that lands in the same
    /// slot is treated as equivalent.
    pub fn lookup(&mut self, key: &CacheKey) -> Option<&CacheEntry> {
        let hash = self.hasher.hash(key);

        match self.entries.get(hash) {
            Some(entry) if entry.answers(key) => {
                self.stats.record_hit();
                Some(entry)
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Prune ==
    /// Drops every entry whose expiry tick is before `current_tick`.
    ///
    /// Call once per simulation tick. Returns the number of entries removed.
    pub fn prune(&mut self, current_tick: u64) -> usize {
        let mut removed = 0;

        while let Some(record) = self.queue.front() {
            if record.expiry_tick >= current_tick {
                break;
            }
            self.remove_front();
            self.stats.record_expiration();
            removed += 1;
        }

        if removed > 0 {
            debug!(removed, current_tick, "pruned expired paths");
        }
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Remove Front ==
    /// Removes the oldest record from both structures.
    fn remove_front(&mut self) {
        let Some(record) = self.queue.pop_front() else {
            debug_assert!(false, "remove_front on empty expiry queue");
            error!("path cache invariant violated: remove_front on empty queue");
            return;
        };

        if self.entries.remove(record.hash).is_none() {
            debug_assert!(false, "queued hash {} missing from store", record.hash);
            error!(
                hash = record.hash,
                "path cache invariant violated: queued hash missing from store"
            );
        }
        self.stats.set_total_entries(self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn timeout_ticks(&self) -> u64 {
        self.timeout_ticks
    }
}

impl<H> Drop for PathCache<H> {
    fn drop(&mut self) {
        info!(
            hits = self.stats.hits,
            hit_percentage = %format!("{:.0}%", self.stats.hit_percentage()),
            collisions = self.stats.collisions,
            "path cache dropped"
        );
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Cell, Waypoint};

    /// Sends every key to the same slot.
    struct ConstantHasher;

    impl KeyHasher for ConstantHasher {
        fn hash(&self, _key: &CacheKey) -> u64 {
            42
        }
    }

    fn key(goal_x: i32) -> CacheKey {
        CacheKey::new(Cell::new(0, 0), Cell::new(goal_x, 0), 4.0, 1)
    }

    fn path(cost: f32) -> Path {
        Path {
            waypoints: vec![Waypoint::new(cost, 0.0, 0.0)],
            cost,
            ..Path::default()
        }
    }

    fn cache(capacity: usize, timeout_ticks: u64) -> PathCache {
        PathCache::with_hasher(GridHasher::new(64, 64), capacity, timeout_ticks)
    }

    #[test]
    fn test_insert_then_lookup_hits() {
        let mut cache = cache(100, 210);

        let outcome = cache.insert(key(5), &path(1.0), SearchResult::Ok, 0);
        assert_eq!(outcome, InsertOutcome::Inserted);

        let entry = cache.lookup(&key(5)).unwrap();
        assert_eq!(entry.path, path(1.0));
        assert_eq!(entry.result, SearchResult::Ok);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_lookup_missing_counts_miss() {
        let mut cache = cache(100, 210);

        assert!(cache.lookup(&key(5)).is_none());
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_lookup_ignores_goal_radius() {
        let mut cache = PathCache::with_hasher(ConstantHasher, 100, 210);
        cache.insert(key(5), &path(1.0), SearchResult::Ok, 0);

        let wider = CacheKey {
            goal_radius: 64.0,
            ..key(5)
        };
        assert!(cache.lookup(&wider).is_some());
    }

    #[test]
    fn test_lookup_verifies_mover_category() {
        let mut cache = PathCache::with_hasher(ConstantHasher, 100, 210);
        cache.insert(key(5), &path(1.0), SearchResult::Ok, 0);

        let other = CacheKey {
            mover_category: 7,
            ..key(5)
        };
        assert!(cache.lookup(&other).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_duplicate_keeps_first_path() {
        let mut cache = cache(100, 210);

        cache.insert(key(5), &path(1.0), SearchResult::Ok, 0);
        let outcome = cache.insert(key(5), &path(2.0), SearchResult::PartialOk, 3);

        assert_eq!(outcome, InsertOutcome::DuplicateIgnored);
        assert!(!outcome.is_collision());
        assert_eq!(cache.queue_len(), 1);
        assert_eq!(cache.lookup(&key(5)).unwrap().path, path(1.0));
    }

    #[test]
    fn test_duplicate_does_not_refresh_expiry() {
        let mut cache = cache(100, 10);

        cache.insert(key(5), &path(1.0), SearchResult::Ok, 0);
        cache.insert(key(5), &path(1.0), SearchResult::Ok, 8);

        assert_eq!(cache.prune(11), 1);
        assert!(cache.lookup(&key(5)).is_none());
    }

    #[test]
    fn test_collision_rejected() {
        let mut cache = PathCache::with_hasher(ConstantHasher, 100, 210);

        cache.insert(key(1), &path(1.0), SearchResult::Ok, 0);
        let outcome = cache.insert(key(2), &path(2.0), SearchResult::Ok, 0);

        assert_eq!(outcome, InsertOutcome::CollisionRejected);
        assert!(outcome.is_collision());
        assert_eq!(cache.stats().collisions, 1);
        assert_eq!(cache.lookup(&key(1)).unwrap().path, path(1.0));
        assert!(cache.lookup(&key(2)).is_none());
    }

    #[test]
    fn test_collision_on_radius_only() {
        let mut cache = PathCache::with_hasher(ConstantHasher, 100, 210);
        let wider = CacheKey {
            goal_radius: 9.0,
            ..key(1)
        };

        cache.insert(key(1), &path(1.0), SearchResult::Ok, 0);
        assert_eq!(
            cache.insert(wider, &path(2.0), SearchResult::Ok, 0),
            InsertOutcome::CollisionRejected
        );
    }

    #[test]
    fn test_prune_expires_after_timeout() {
        let mut cache = cache(100, 10);
        cache.insert(key(5), &path(1.0), SearchResult::Ok, 0);

        // Expiry tick 10 is not before 10
        assert_eq!(cache.prune(10), 0);
        assert!(cache.lookup(&key(5)).is_some());

        assert_eq!(cache.prune(11), 1);
        assert!(cache.lookup(&key(5)).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.queue_len(), 0);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_prune_stops_at_first_live_record() {
        let mut cache = cache(100, 10);
        cache.insert(key(1), &path(1.0), SearchResult::Ok, 0);
        cache.insert(key(2), &path(2.0), SearchResult::Ok, 5);
        cache.insert(key(3), &path(3.0), SearchResult::Ok, 9);

        assert_eq!(cache.prune(16), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup(&key(3)).is_some());
    }

    #[test]
    fn test_capacity_scenario() {
        let mut cache = cache(2, 10);

        cache.insert(key(1), &path(1.0), SearchResult::Ok, 0);
        cache.insert(key(2), &path(2.0), SearchResult::Ok, 1);
        cache.insert(key(3), &path(3.0), SearchResult::Ok, 2);

        assert!(cache.lookup(&key(1)).is_none());
        assert!(cache.lookup(&key(2)).is_some());
        assert!(cache.lookup(&key(3)).is_some());
        assert_eq!(cache.queue_len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_eviction_runs_before_duplicate() {
        let mut cache = cache(2, 10);

        cache.insert(key(1), &path(1.0), SearchResult::Ok, 0);
        cache.insert(key(2), &path(2.0), SearchResult::Ok, 0);

        // Queue is full: key(1) goes even though key(2) is only a duplicate
        assert_eq!(
            cache.insert(key(2), &path(9.0), SearchResult::Ok, 1),
            InsertOutcome::DuplicateIgnored
        );
        assert!(cache.lookup(&key(1)).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = cache(0, 10);
        assert_eq!(cache.capacity(), 1);

        cache.insert(key(1), &path(1.0), SearchResult::Ok, 0);
        cache.insert(key(2), &path(2.0), SearchResult::Ok, 0);
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup(&key(2)).is_some());
    }

    #[test]
    fn test_from_config() {
        let config = CacheConfig::default();
        let cache = PathCache::from_config(&config);

        assert_eq!(cache.capacity(), config.capacity);
        assert_eq!(cache.timeout_ticks(), config.timeout_ticks);
        assert!(cache.is_empty());
    }
}
