//! Tick Prune Task
//!
//! Background task that advances the simulation clock and prunes the cache
//! once per tick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::PathCache;

/// A path cache shared between query workers and the tick loop.
///
/// Every operation takes the single mutex, so inserts, lookups and prunes
/// are serialized.
pub type SharedPathCache = Arc<Mutex<PathCache>>;

// == Sim Clock ==
/// Monotonically non-decreasing simulation tick counter.
///
/// Owned by the simulation; caches only ever read it.
#[derive(Debug, Default)]
pub struct SimClock {
    tick: AtomicU64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick.
    pub fn now(&self) -> u64 {
        self.tick.load(Ordering::Acquire)
    }

    /// Moves to the next tick and returns it.
    pub fn advance(&self) -> u64 {
        self.tick.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// Spawns the fixed-step tick loop for `cache`.
///
/// Each interval the clock advances by exactly one tick and the cache is
/// pruned once at that tick. Late intervals are delayed rather than burst,
/// so a stalled runtime never prunes several ticks back to back.
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(Mutex::new(PathCache::from_config(&config)));
/// let clock = Arc::new(SimClock::new());
/// let handle = spawn_prune_task(cache.clone(), clock.clone(), Duration::from_millis(33));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_prune_task(
    cache: SharedPathCache,
    clock: Arc<SimClock>,
    tick_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(?tick_interval, "Starting path cache tick loop");

        let mut ticker = tokio::time::interval(tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let tick = clock.advance();
            let removed = {
                let mut cache_guard = cache.lock().await;
                cache_guard.prune(tick)
            };

            if removed > 0 {
                debug!(tick, removed, "Tick prune removed expired paths");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheKey, Cell, GridHasher, Path, SearchResult};

    fn shared_cache(timeout_ticks: u64) -> SharedPathCache {
        Arc::new(Mutex::new(PathCache::with_hasher(
            GridHasher::new(32, 32),
            100,
            timeout_ticks,
        )))
    }

    fn key() -> CacheKey {
        CacheKey::new(Cell::new(0, 0), Cell::new(4, 4), 1.0, 0)
    }

    #[test]
    fn test_clock_advances() {
        let clock = SimClock::new();
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.advance(), 2);
        assert_eq!(clock.now(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_prune_task_expires_entries() {
        let cache = shared_cache(2);
        let clock = Arc::new(SimClock::new());

        cache
            .lock()
            .await
            .insert(key(), &Path::default(), SearchResult::Ok, clock.now());

        let handle = spawn_prune_task(cache.clone(), clock.clone(), Duration::from_millis(10));

        // Expiry tick 2 is pruned at tick 3
        tokio::time::sleep(Duration::from_millis(55)).await;
        assert!(clock.now() >= 3);

        {
            let mut cache_guard = cache.lock().await;
            assert!(cache_guard.lookup(&key()).is_none());
            assert_eq!(cache_guard.stats().expirations, 1);
        }

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_prune_task_preserves_live_entries() {
        let cache = shared_cache(1_000);
        let clock = Arc::new(SimClock::new());

        cache
            .lock()
            .await
            .insert(key(), &Path::default(), SearchResult::Ok, clock.now());

        let handle = spawn_prune_task(cache.clone(), clock.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.lock().await.lookup(&key()).is_some());
        handle.abort();
    }

    #[tokio::test]
    async fn test_prune_task_can_be_aborted() {
        let handle = spawn_prune_task(
            shared_cache(10),
            Arc::new(SimClock::new()),
            Duration::from_millis(10),
        );

        handle.abort();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
