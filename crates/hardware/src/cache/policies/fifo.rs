//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy installs every fetched line at a per-set cursor and then
//! advances the cursor circularly. It does not look for empty slots first: a
//! freshly constructed set is filled in strict arrival order starting at way 0,
//! so eviction order always equals arrival order modulo the set capacity.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `install()`: O(1)
//! - **Space Complexity:** O(S) where S is the number of sets
//! - **Hardware Cost:** Minimal - single counter per set

use super::{Installed, ReplacementPolicy};
use crate::cache::line::{CacheLine, CacheSet};
use crate::config::ReplacementPolicy as PolicyType;

/// FIFO Policy state.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    /// Tracks the next way to be written for each set.
    next_free: Vec<usize>,
    /// Number of ways in the cache.
    ways: usize,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            next_free: vec![0; sets],
            ways,
        }
    }

    /// Returns the way the next miss in `set_index` will be written to.
    pub fn cursor(&self, set_index: usize) -> usize {
        self.next_free[set_index]
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn kind(&self) -> PolicyType {
        PolicyType::Fifo
    }

    /// The per-set cursors must cover every set, at the configured associativity.
    fn fits(&self, sets: usize, ways: usize) -> bool {
        self.next_free.len() == sets && self.ways == ways
    }

    fn new_set(&self, ways: usize, block_len: usize) -> CacheSet {
        CacheSet::filled(ways, block_len)
    }

    /// Hits do not affect arrival order.
    fn update(&mut self, _set_index: usize, _set: &mut CacheSet, way: usize) -> usize {
        way
    }

    /// Writes at the cursor, whether or not other ways are still invalid.
    fn install(&mut self, set_index: usize, set: &mut CacheSet, line: CacheLine) -> Installed {
        let way = self.next_free[set_index];
        self.next_free[set_index] = (way + 1) % set.capacity();
        let old = set.replace(way, line);
        Installed {
            way,
            evicted: old.valid.then_some(old),
        }
    }
}
