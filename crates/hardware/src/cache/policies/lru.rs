//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy keeps every set ordered by recency, most recently used at the
//! front. A hit moves the line to the front; a miss prepends the new line and,
//! once the set is at capacity, drops the tail (the least recently used line).
//! Recency is therefore updated on both hits and installs.
//!
//! Sets are `VecDeque`s rather than linked lists, so moving a hit line to the
//! front shifts the lines ahead of it: O(W) per hit instead of a constant-time
//! unlink. Associativity is small, so the scan to find the line dominates
//! either way.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W) where W is the number of ways (associativity)
//!   - `install()`: O(1)
//! - **Space Complexity:** No state beyond the ordering of the sets themselves
//! - **Best Case:** Loops whose reuse distance fits in the set
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{Installed, ReplacementPolicy};
use crate::cache::line::{CacheLine, CacheSet};
use crate::config::ReplacementPolicy as PolicyType;

/// LRU Policy state.
///
/// Recency lives in the order of each set's lines, so the policy itself is
/// stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl LruPolicy {
    /// Creates a new LRU policy instance.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for LruPolicy {
    fn kind(&self) -> PolicyType {
        PolicyType::Lru
    }

    /// LRU sets start empty and grow at the front until they reach `ways`.
    fn new_set(&self, ways: usize, _block_len: usize) -> CacheSet {
        CacheSet::empty(ways)
    }

    /// Moves the hit line to the MRU position.
    fn update(&mut self, _set_index: usize, set: &mut CacheSet, way: usize) -> usize {
        set.move_to_front(way);
        0
    }

    fn install(&mut self, _set_index: usize, set: &mut CacheSet, line: CacheLine) -> Installed {
        let evicted = if set.len() >= set.capacity() {
            set.pop_back()
        } else {
            None
        };
        set.push_front(line);
        Installed { way: 0, evicted }
    }
}
