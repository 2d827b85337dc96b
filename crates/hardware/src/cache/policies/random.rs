//! Random Replacement Policy.
//!
//! This policy fills a set's invalid ways first, scanning from way 0. Only when
//! every way is valid does it evict, choosing the victim uniformly from
//! `[0, ways)` with an independent draw per eviction. Hits never reorder lines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Installed, ReplacementPolicy};
use crate::cache::line::{CacheLine, CacheSet};
use crate::config::ReplacementPolicy as PolicyType;

/// Random Policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Generator for eviction draws.
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `seed` - Fixes the sequence of eviction draws; when `None` the
    ///   generator is seeded from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn kind(&self) -> PolicyType {
        PolicyType::Random
    }

    fn new_set(&self, ways: usize, block_len: usize) -> CacheSet {
        CacheSet::filled(ways, block_len)
    }

    /// Access patterns do not affect random replacement.
    fn update(&mut self, _set_index: usize, _set: &mut CacheSet, way: usize) -> usize {
        way
    }

    fn install(&mut self, _set_index: usize, set: &mut CacheSet, line: CacheLine) -> Installed {
        if let Some(way) = set.first_invalid() {
            let _ = set.replace(way, line);
            return Installed { way, evicted: None };
        }
        let way = self.rng.gen_range(0..set.capacity());
        let old = set.replace(way, line);
        Installed {
            way,
            evicted: Some(old),
        }
    }
}
