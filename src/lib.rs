//! Path Cache - bounded, tick-windowed caching of pathfinding queries
//!
//! Avoids re-running a grid path search when the same query recurs within a
//! short window of simulation ticks.

pub mod cache;
pub mod config;
pub mod error;
pub mod manager;
pub mod tasks;

pub use cache::{CacheKey, InsertOutcome, PathCache};
pub use config::CacheConfig;
pub use manager::{PathManager, PathSearch};
pub use tasks::{spawn_prune_task, SharedPathCache, SimClock};
