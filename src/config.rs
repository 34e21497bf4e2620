//! Configuration Module
//!
//! Loads cache and simulation parameters from environment variables.

use std::env;
use std::str::FromStr;

use serde::Serialize;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TIMEOUT_TICKS, TICKS_PER_SECOND};
use crate::error::{PathCacheError, Result};

/// Cache and simulation parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheConfig {
    /// Maximum number of queued entries per cache
    pub capacity: usize,
    /// Ticks a cached path stays valid
    pub timeout_ticks: u64,
    /// Pathfinding grid width in cells
    pub blocks_x: u32,
    /// Pathfinding grid height in cells
    pub blocks_z: u32,
    /// Wall-clock duration of one simulation tick in milliseconds
    pub tick_interval_ms: u64,
    /// Number of ticks the demo simulation runs
    pub sim_ticks: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PATH_CACHE_CAPACITY` - Queued entries per cache (default: 100)
    /// - `PATH_CACHE_TIMEOUT_TICKS` - Entry lifetime in ticks (default: 210)
    /// - `PATH_CACHE_BLOCKS_X` - Grid width (default: 256)
    /// - `PATH_CACHE_BLOCKS_Z` - Grid height (default: 256)
    /// - `SIM_TICK_MS` - Tick interval in milliseconds (default: 33)
    /// - `SIM_TICKS` - Demo run length in ticks (default: 300)
    ///
    /// Unset variables fall back to defaults; set but malformed ones are errors.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            capacity: env_or("PATH_CACHE_CAPACITY", defaults.capacity)?,
            timeout_ticks: env_or("PATH_CACHE_TIMEOUT_TICKS", defaults.timeout_ticks)?,
            blocks_x: env_or("PATH_CACHE_BLOCKS_X", defaults.blocks_x)?,
            blocks_z: env_or("PATH_CACHE_BLOCKS_Z", defaults.blocks_z)?,
            tick_interval_ms: env_or("SIM_TICK_MS", defaults.tick_interval_ms)?,
            sim_ticks: env_or("SIM_TICKS", defaults.sim_ticks)?,
        })
    }

    // == Validate ==
    /// Rejects values the cache or the tick loop cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(PathCacheError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.blocks_x == 0 || self.blocks_z == 0 {
            return Err(PathCacheError::InvalidConfig(format!(
                "grid dimensions must be non-zero, got {}x{}",
                self.blocks_x, self.blocks_z
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(PathCacheError::InvalidConfig(
                "tick interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            timeout_ticks: DEFAULT_TIMEOUT_TICKS,
            blocks_x: 256,
            blocks_z: 256,
            tick_interval_ms: 1000 / TICKS_PER_SECOND,
            sim_ticks: 300,
        }
    }
}

fn env_or<T: FromStr>(var: &str, default: T) -> Result<T> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| PathCacheError::InvalidEnv {
                var: var.to_string(),
                value,
            }),
        Err(_) => Ok(default),
    }
}
