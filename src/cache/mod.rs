//! Cache Module
//!
//! Bounded, tick-windowed caching of pathfinding query results.

mod entry;
mod key;
mod path_cache;
mod queue;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, Path, SearchResult, Waypoint};
pub use key::{CacheKey, Cell, GridHasher, KeyHasher};
pub use path_cache::{InsertOutcome, PathCache};
pub use queue::{ExpiryQueue, QueueRecord};
pub use stats::CacheStats;
pub use store::EntryStore;

// == Public Constants ==
/// Simulation ticks per game second
pub const TICKS_PER_SECOND: u64 = 30;

/// Default number of queued entries per cache
pub const DEFAULT_CAPACITY: usize = 100;

/// Default entry lifetime: seven simulation seconds
pub const DEFAULT_TIMEOUT_TICKS: u64 = 7 * TICKS_PER_SECOND;
