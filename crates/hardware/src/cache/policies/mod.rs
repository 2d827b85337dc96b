//! Cache Replacement Policies.
//!
//! Implements the algorithms that decide where a block fetched on a miss is
//! installed, and how a hit updates recency bookkeeping.
//!
//! # Policies
//!
//! - `Random`: fill empty slots first, then evict a uniformly drawn way.
//! - `Fifo`: install at a rotating per-set cursor.
//! - `Lru`: keep each set in recency order and evict the tail.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

use std::fmt;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use super::line::{CacheLine, CacheSet};
use crate::config::ReplacementPolicy as PolicyType;

/// Outcome of installing a line into a set.
#[derive(Debug, Clone, PartialEq)]
pub struct Installed {
    /// Way the new line occupies after installation.
    pub way: usize,
    /// The valid line that was evicted to make room, if any.
    pub evicted: Option<CacheLine>,
}

/// Trait for cache replacement policies.
///
/// Each policy owns the layout of its sets: it builds them, reorders them on
/// hits, and chooses the slot for a newly fetched line.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// The configuration variant this policy implements.
    fn kind(&self) -> PolicyType;

    /// Returns `true` if this policy can drive `sets` sets of `ways` ways.
    fn fits(&self, _sets: usize, _ways: usize) -> bool {
        true
    }

    /// Builds an empty set of `ways` lines of `block_len` elements.
    fn new_set(&self, ways: usize, block_len: usize) -> CacheSet;

    /// Updates the policy state when the line at `way` is hit.
    ///
    /// # Returns
    ///
    /// The way the line occupies after the update.
    fn update(&mut self, set_index: usize, set: &mut CacheSet, way: usize) -> usize;

    /// Places `line` into `set`, evicting a resident line if required.
    fn install(&mut self, set_index: usize, set: &mut CacheSet, line: CacheLine) -> Installed;
}

/// Builds the policy selected by `kind` for a cache of `sets` sets of `ways` ways.
///
/// `seed` fixes the random policy's eviction draws; it is ignored by the
/// deterministic policies.
pub fn build(
    kind: PolicyType,
    sets: usize,
    ways: usize,
    seed: Option<u64>,
) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Random => Box::new(RandomPolicy::new(seed)),
        PolicyType::Fifo => Box::new(FifoPolicy::new(sets, ways)),
        PolicyType::Lru => Box::new(LruPolicy::new()),
    }
}
