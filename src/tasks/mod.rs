//! Background Tasks Module
//!
//! Drives a shared path cache from a fixed-step tick loop.
//!
//! # Tasks
//! - Prune: advances the simulation clock and prunes expired paths every tick

mod prune;

pub use prune::{spawn_prune_task, SharedPathCache, SimClock};
