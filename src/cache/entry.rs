//! Cache Entry Module
//!
//! Defines the path value produced by the search and the entry that owns a copy of it.

use serde::Serialize;

use crate::cache::{CacheKey, Cell};

// == Waypoint ==
/// A world-space position along a path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Waypoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Waypoint {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

// == Path ==
/// A path as produced by the search component.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Path {
    /// World positions, goal first
    pub waypoints: Vec<Waypoint>,
    /// Grid cells traversed
    pub cells: Vec<Cell>,
    pub goal: Waypoint,
    pub goal_radius: f32,
    pub cost: f32,
}

impl Path {
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

// == Search Result ==
/// Outcome status reported by the search component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchResult {
    Ok,
    /// Goal not reachable, path leads as close as possible
    PartialOk,
    CannotReach,
    GoalOutOfRange,
    Error,
}

impl SearchResult {
    /// Whether the search produced a usable path worth caching.
    pub fn is_success(self) -> bool {
        matches!(self, SearchResult::Ok | SearchResult::PartialOk)
    }
}

// == Cache Entry ==
/// A cached search: the query it answers plus its own copy of the path.
///
/// Entries are never mutated after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub path: Path,
    pub result: SearchResult,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry holding a clone of `path`, so the caller keeps its own.
    pub fn new(key: CacheKey, path: &Path, result: SearchResult) -> Self {
        Self {
            key,
            path: path.clone(),
            result,
        }
    }

    /// Fields a lookup verifies. Goal radius is not among them.
    pub fn answers(&self, key: &CacheKey) -> bool {
        self.key.start == key.start
            && self.key.goal == key.goal
            && self.key.mover_category == key.mover_category
    }
}
