//! Cache engine tests.
//!
//! Every test here runs against all three replacement policies on the
//! 512 B / 64 B / 2-way scenario cache (4 sets of 8-element blocks).

use cachesim_core::cache::CacheEngine;
use cachesim_core::cache::policies::{self, FifoPolicy};
use cachesim_core::common::{Address, ConfigError, SimError};
use cachesim_core::config::ReplacementPolicy;
use cachesim_core::memory::MemoryStore;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{MEMORY_BLOCKS, NUM_SETS, cache_config, scenario_addr, scenario_cache};

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[rstest]
fn new_cache_is_empty(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let cache = scenario_cache(policy);

    assert_eq!(cache.policy(), policy);
    assert_eq!(cache.sets().len(), NUM_SETS);
    assert_eq!(cache.geometry().associativity, 2);
    for set in 0..NUM_SETS {
        assert_eq!(cache.set_occupancy(set), 0);
        assert!(cache.resident_tags(set).is_empty());
    }
    assert_eq!(cache.stats().accesses(), 0);
}

#[test]
fn block_length_mismatch_is_rejected() {
    let config = cache_config(512, 64, 2, ReplacementPolicy::Lru);
    let memory = MemoryStore::new(16, 4).unwrap();

    let err = CacheEngine::new(&config, memory).err();
    assert_eq!(err, Some(ConfigError::BlockLengthMismatch { cache: 8, memory: 4 }));
}

/// A policy sized for another cache shape is refused up front instead of
/// indexing past its per-set state on a later miss.
#[rstest]
#[case::more_ways(4, 4)]
#[case::fewer_sets(2, 2)]
fn mismatched_policy_is_rejected(#[case] sets: usize, #[case] ways: usize) {
    let geometry = cache_config(512, 64, 2, ReplacementPolicy::Fifo).geometry().unwrap();
    let memory = MemoryStore::new(MEMORY_BLOCKS, 8).unwrap();

    let err = CacheEngine::with_policy(geometry, Box::new(FifoPolicy::new(sets, ways)), memory).err();
    assert_eq!(
        err,
        Some(ConfigError::PolicyGeometryMismatch {
            policy: ReplacementPolicy::Fifo,
            sets: 4,
            ways: 2,
        })
    );
}

#[rstest]
fn matching_policy_is_accepted(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let geometry = cache_config(512, 64, 2, policy).geometry().unwrap();
    let memory = MemoryStore::new(MEMORY_BLOCKS, 8).unwrap();
    let mut cache =
        CacheEngine::with_policy(geometry, policies::build(policy, 4, 2, Some(1)), memory).unwrap();

    for tag in 0..3 {
        let _ = cache.read(scenario_addr(tag, 0, 0)).unwrap();
    }
    assert_eq!(cache.set_occupancy(0), 2);
}

#[test]
fn invalid_geometry_is_rejected() {
    let config = cache_config(512, 64, 3, ReplacementPolicy::Fifo);
    let memory = MemoryStore::new(16, 8).unwrap();

    assert!(matches!(
        CacheEngine::new(&config, memory),
        Err(ConfigError::BlocksNotWayMultiple { .. })
    ));
}

// ══════════════════════════════════════════════════════════
// 2. Hits and misses
// ══════════════════════════════════════════════════════════

#[rstest]
fn first_access_misses_then_hits(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let mut cache = scenario_cache(policy);

    // Block 1 holds elements 8..16.
    assert_eq!(cache.read(scenario_addr(0, 1, 0)).unwrap(), 8.0);
    assert_eq!(cache.stats().read_misses, 1);
    assert_eq!(cache.stats().read_hits, 0);

    assert_eq!(cache.read(scenario_addr(0, 1, 5)).unwrap(), 13.0);
    assert_eq!(cache.stats().read_misses, 1);
    assert_eq!(cache.stats().read_hits, 1);
    assert_eq!(cache.resident_tags(1), vec![0]);
}

#[rstest]
fn write_then_read_returns_written_value(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let mut cache = scenario_cache(policy);
    let addr = scenario_addr(2, 3, 4);

    cache.write(addr, 42.0).unwrap();
    assert_eq!(cache.stats().write_misses, 1);

    assert_eq!(cache.read(addr).unwrap(), 42.0);
    assert_eq!(cache.stats().read_hits, 1);

    // Neighbouring elements still carry the fetched block's values.
    assert_eq!(cache.read(scenario_addr(2, 3, 5)).unwrap(), 93.0);
}

#[rstest]
fn write_to_resident_block_is_a_write_hit(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let mut cache = scenario_cache(policy);

    let _ = cache.read(scenario_addr(1, 2, 0)).unwrap();
    cache.write(scenario_addr(1, 2, 7), 1.5).unwrap();

    assert_eq!(cache.stats().read_misses, 1);
    assert_eq!(cache.stats().write_hits, 1);
    assert_eq!(cache.stats().write_misses, 0);
}

#[rstest]
fn conflicting_blocks_never_exceed_associativity(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let mut cache = scenario_cache(policy);

    for tag in 0..3 {
        let _ = cache.read(scenario_addr(tag, 0, 0)).unwrap();
    }

    assert_eq!(cache.stats().read_misses, 3);
    assert_eq!(cache.set_occupancy(0), 2);
    assert!(cache.resident_tags(0).contains(&2));
    // Other sets are untouched.
    for set in 1..NUM_SETS {
        assert_eq!(cache.set_occupancy(set), 0);
    }
}

#[rstest]
fn sets_are_independent(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let mut cache = scenario_cache(policy);
    let _ = cache.read(scenario_addr(0, 1, 0)).unwrap();

    // Thrash set 0 with every block that maps to it.
    for tag in 0..(MEMORY_BLOCKS / NUM_SETS) as u32 {
        let _ = cache.read(scenario_addr(tag, 0, 0)).unwrap();
    }

    assert!(cache.contains(scenario_addr(0, 1, 0)));
    let _ = cache.read(scenario_addr(0, 1, 3)).unwrap();
    assert_eq!(cache.stats().read_hits, 1);
}

#[rstest]
fn every_access_updates_exactly_one_counter(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let mut cache = scenario_cache(policy);
    let mut issued = 0;

    for step in 0..64u32 {
        let addr = scenario_addr(step % 5, step % 4, step % 8);
        if step % 3 == 0 {
            cache.write(addr, f64::from(step)).unwrap();
        } else {
            let _ = cache.read(addr).unwrap();
        }
        issued += 1;
        assert_eq!(cache.stats().accesses(), issued);
    }

    let stats = cache.stats();
    assert_eq!(stats.reads() + stats.writes(), 64);
}

#[rstest]
fn contains_does_not_count_as_access(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let mut cache = scenario_cache(policy);
    let addr = scenario_addr(0, 0, 0);

    assert!(!cache.contains(addr));
    let _ = cache.read(addr).unwrap();
    assert!(cache.contains(addr));
    assert!(cache.contains(scenario_addr(0, 0, 7)));
    assert!(!cache.contains(scenario_addr(1, 0, 0)));
    assert_eq!(cache.stats().accesses(), 1);
}

// ══════════════════════════════════════════════════════════
// 3. No write-back
// ══════════════════════════════════════════════════════════

#[rstest]
fn writes_never_reach_memory(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let mut cache = scenario_cache(policy);
    let addr = scenario_addr(0, 2, 1);

    cache.write(addr, -1.0).unwrap();

    assert_eq!(cache.read(addr).unwrap(), -1.0);
    assert_eq!(cache.memory().read(addr).unwrap(), 17.0);
}

/// A written line that is evicted loses its write; the next miss re-fetches
/// the store's value.
#[rstest]
#[case::fifo(ReplacementPolicy::Fifo)]
#[case::lru(ReplacementPolicy::Lru)]
fn evicted_write_is_lost(#[case] policy: ReplacementPolicy) {
    let mut cache = scenario_cache(policy);
    let a = scenario_addr(0, 0, 1);

    cache.write(a, 42.0).unwrap();
    let _ = cache.read(scenario_addr(1, 0, 0)).unwrap();
    let _ = cache.read(scenario_addr(2, 0, 0)).unwrap();
    assert!(!cache.contains(a));

    assert_eq!(cache.read(a).unwrap(), 1.0);
    assert_eq!(cache.stats().read_misses, 3);
}

#[test]
fn memory_mut_bypasses_the_cache() {
    let mut cache = scenario_cache(ReplacementPolicy::Lru);
    let addr = scenario_addr(0, 0, 0);

    cache.memory_mut().write(addr, 5.0).unwrap();
    assert_eq!(cache.stats().accesses(), 0);
    assert!(!cache.contains(addr));
    assert_eq!(cache.read(addr).unwrap(), 5.0);

    let memory = cache.into_memory();
    assert_eq!(memory.read(addr).unwrap(), 5.0);
}

// ══════════════════════════════════════════════════════════
// 4. Bounds
// ══════════════════════════════════════════════════════════

#[rstest]
fn out_of_range_access_fails_without_side_effects(
    #[values(ReplacementPolicy::Random, ReplacementPolicy::Fifo, ReplacementPolicy::Lru)]
    policy: ReplacementPolicy,
) {
    let mut cache = scenario_cache(policy);
    let beyond = Address::new(2048);
    let expected = SimError::AddressOutOfRange {
        address: 2048,
        block_index: 32,
        num_blocks: 32,
    };

    assert_eq!(cache.read(beyond), Err(expected.clone()));
    assert_eq!(cache.write(beyond, 1.0), Err(expected));
    assert_eq!(cache.stats().accesses(), 0);
    assert_eq!(cache.set_occupancy(0), 0);
}
