//! Expiry Queue Module
//!
//! FIFO of (hash, expiry tick) records in insertion order.

use std::collections::VecDeque;

// == Queue Record ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueRecord {
    pub hash: u64,
    pub expiry_tick: u64,
}

// == Expiry Queue ==
/// Records appended in insertion order.
///
/// Every record is appended with `current_tick + timeout`, and ticks never go
/// backwards, so the queue is non-decreasing in `expiry_tick` from front to
/// back. Pruning relies on this and only ever inspects the front.
#[derive(Debug, Default)]
pub struct ExpiryQueue {
    records: VecDeque<QueueRecord>,
}

impl ExpiryQueue {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
        }
    }

    // == Push Back ==
    /// Appends a record. Panics in debug builds if it would break the
    /// ascending-expiry order.
    pub fn push_back(&mut self, hash: u64, expiry_tick: u64) {
        debug_assert!(
            self.records
                .back()
                .map_or(true, |last| last.expiry_tick <= expiry_tick),
            "expiry queue out of order: tick went backwards"
        );
        self.records.push_back(QueueRecord { hash, expiry_tick });
    }

    // == Front ==
    pub fn front(&self) -> Option<QueueRecord> {
        self.records.front().copied()
    }

    // == Pop Front ==
    pub fn pop_front(&mut self) -> Option<QueueRecord> {
        self.records.pop_front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
