//! Cache Key Module
//!
//! Defines the composite query key and the hashers that fold it into a slot.

use serde::Serialize;

// == Cell ==
/// A discrete coordinate in the pathfinding grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// == Cache Key ==
/// Identifies one path query: start cell, goal cell, goal tolerance and
/// the mover category whose passability rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheKey {
    pub start: Cell,
    pub goal: Cell,
    pub goal_radius: f32,
    pub mover_category: u32,
}

impl CacheKey {
    // == Constructor ==
    pub const fn new(start: Cell, goal: Cell, goal_radius: f32, mover_category: u32) -> Self {
        Self {
            start,
            goal,
            goal_radius,
            mover_category,
        }
    }

    /// Exact equality on all four fields, radius compared bitwise.
    ///
    /// Used by inserts to tell a duplicate from a hash collision.
    pub fn same_query(&self, other: &CacheKey) -> bool {
        self.start == other.start
            && self.goal == other.goal
            && self.goal_radius.to_bits() == other.goal_radius.to_bits()
            && self.mover_category == other.mover_category
    }
}

// == Key Hasher ==
/// Folds a [`CacheKey`] into a single slot hash.
///
/// Implementations must be pure: the same key always yields the same hash
/// for the lifetime of the hasher. Distinct keys are allowed to collide.
pub trait KeyHasher {
    fn hash(&self, key: &CacheKey) -> u64;
}

// == Grid Hasher ==
/// Default hasher, aware of the grid dimensions so that distinct
/// (start, goal) pairs on the same map map to distinct base indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridHasher {
    blocks_x: u64,
    blocks_z: u64,
}

const RADIUS_MIX: u64 = 0x9E37_79B9_7F4A_7C15;
const CATEGORY_MIX: u64 = 0xC2B2_AE3D_27D4_EB4F;

impl GridHasher {
    pub fn new(blocks_x: u32, blocks_z: u32) -> Self {
        Self {
            blocks_x: u64::from(blocks_x.max(1)),
            blocks_z: u64::from(blocks_z.max(1)),
        }
    }

    fn cell_index(&self, cell: Cell) -> u64 {
        // Negative coordinates wrap; they only need to be deterministic.
        (cell.y as i64 as u64)
            .wrapping_mul(self.blocks_x)
            .wrapping_add(cell.x as i64 as u64)
    }
}

impl KeyHasher for GridHasher {
    fn hash(&self, key: &CacheKey) -> u64 {
        let num_cells = self.blocks_x.wrapping_mul(self.blocks_z);
        let base = self
            .cell_index(key.start)
            .wrapping_add(self.cell_index(key.goal).wrapping_mul(num_cells));

        let radius = u64::from(key.goal_radius.to_bits()).wrapping_mul(RADIUS_MIX);
        let category = u64::from(key.mover_category)
            .wrapping_add(1)
            .wrapping_mul(CATEGORY_MIX);

        base ^ radius.rotate_left(32) ^ category
    }
}
