//! Entry Store Module
//!
//! Hash-slot storage for cache entries. One entry per slot, no chaining.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::cache::CacheEntry;

// == Entry Store ==
/// Owns cached entries keyed by slot hash. Holds no policy.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: HashMap<u64, CacheEntry>,
}

impl EntryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Insert If Absent ==
    /// Stores `entry` at `hash` unless the slot is taken.
    ///
    /// Returns `true` if the entry was stored.
    pub fn insert_if_absent(&mut self, hash: u64, entry: CacheEntry) -> bool {
        match self.entries.entry(hash) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    // == Get ==
    pub fn get(&self, hash: u64) -> Option<&CacheEntry> {
        self.entries.get(&hash)
    }

    // == Remove ==
    /// Drops the entry at `hash`, returning it if present.
    pub fn remove(&mut self, hash: u64) -> Option<CacheEntry> {
        self.entries.remove(&hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
