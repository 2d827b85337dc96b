//! Set-Associative Cache Engine.
//!
//! This module implements a single-level set-associative cache in front of the
//! simulated memory store. It supports three replacement policies (Random,
//! FIFO, LRU) and models read/write hits and misses.
//!
//! The cache is write-allocate with no write-back: writes only ever mutate the
//! cache-resident copy of a block. When that line is evicted the write is lost,
//! and a later miss re-fetches the memory store's value.

/// Cache lines and sets.
pub mod line;

/// Cache replacement policy implementations (FIFO, LRU, Random).
pub mod policies;

use tracing::{info, trace};

use self::line::{CacheLine, CacheSet};
use self::policies::ReplacementPolicy;
use crate::common::addr::{Address, DecodedAddress};
use crate::common::data::AccessType;
use crate::common::error::{ConfigError, SimError};
use crate::config::{CacheConfig, CacheGeometry, ReplacementPolicy as PolicyType};
use crate::memory::MemoryStore;
use crate::stats::CacheStats;

/// Cache engine owning its sets, its replacement policy, and the backing store.
///
/// # Examples
///
/// ```
/// use cachesim_core::cache::CacheEngine;
/// use cachesim_core::common::Address;
/// use cachesim_core::config::CacheConfig;
/// use cachesim_core::memory::MemoryStore;
///
/// let config = CacheConfig { size_bytes: 512, block_bytes: 64, ..CacheConfig::default() };
/// let memory = MemoryStore::new(16, 8).unwrap();
/// let mut cache = CacheEngine::new(&config, memory).unwrap();
///
/// cache.write(Address::new(0x40), 2.5).unwrap();
/// assert_eq!(cache.read(Address::new(0x40)).unwrap(), 2.5);
/// assert_eq!(cache.stats().write_misses, 1);
/// assert_eq!(cache.stats().read_hits, 1);
/// ```
#[derive(Debug)]
pub struct CacheEngine {
    geometry: CacheGeometry,
    sets: Vec<CacheSet>,
    policy: Box<dyn ReplacementPolicy>,
    memory: MemoryStore,
    stats: CacheStats,
}

impl CacheEngine {
    /// Creates a cache engine with the specified configuration in front of `memory`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is inconsistent or if
    /// the store's block length differs from the cache's.
    pub fn new(config: &CacheConfig, memory: MemoryStore) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        let policy = policies::build(
            config.policy,
            geometry.num_sets,
            geometry.associativity,
            config.seed,
        );
        Self::with_policy(geometry, policy, memory)
    }

    /// Creates a cache engine from an already validated geometry and policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlockLengthMismatch`] if the store's block
    /// length differs from the geometry's, and
    /// [`ConfigError::PolicyGeometryMismatch`] if `policy` was built for a
    /// different number of sets or ways.
    pub fn with_policy(
        geometry: CacheGeometry,
        policy: Box<dyn ReplacementPolicy>,
        memory: MemoryStore,
    ) -> Result<Self, ConfigError> {
        if memory.block_len() != geometry.block_len {
            return Err(ConfigError::BlockLengthMismatch {
                cache: geometry.block_len,
                memory: memory.block_len(),
            });
        }

        if !policy.fits(geometry.num_sets, geometry.associativity) {
            return Err(ConfigError::PolicyGeometryMismatch {
                policy: policy.kind(),
                sets: geometry.num_sets,
                ways: geometry.associativity,
            });
        }

        let sets = (0..geometry.num_sets)
            .map(|_| policy.new_set(geometry.associativity, geometry.block_len))
            .collect();

        info!(
            policy = %policy.kind(),
            sets = geometry.num_sets,
            ways = geometry.associativity,
            block_bytes = geometry.block_bytes,
            "cache engine constructed"
        );

        Ok(Self {
            geometry,
            sets,
            policy,
            memory,
            stats: CacheStats::default(),
        })
    }

    /// Reads the element at `addr`, fetching its block on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`] if a miss needs a block outside
    /// the memory store.
    pub fn read(&mut self, addr: Address) -> Result<f64, SimError> {
        let (set_index, way, offset) = self.access(addr, AccessType::Read)?;
        Ok(self.sets[set_index][way].block[offset])
    }

    /// Writes `value` to the element at `addr` in the cache-resident block.
    ///
    /// The memory store is not updated.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`] if a miss needs a block outside
    /// the memory store.
    pub fn write(&mut self, addr: Address, value: f64) -> Result<(), SimError> {
        let (set_index, way, offset) = self.access(addr, AccessType::Write)?;
        self.sets[set_index][way].block[offset] = value;
        Ok(())
    }

    /// Looks up `addr`, installing its block on a miss.
    ///
    /// # Returns
    ///
    /// `(set_index, way, offset)` of the element in the now-resident line.
    fn access(&mut self, addr: Address, kind: AccessType) -> Result<(usize, usize, usize), SimError> {
        let DecodedAddress {
            tag,
            set_index,
            offset,
            ..
        } = self.geometry.codec.decode(addr);
        let set = &mut self.sets[set_index];

        if let Some(way) = set.find(tag) {
            self.stats.record(kind, true);
            let way = self.policy.update(set_index, set, way);
            return Ok((set_index, way, offset));
        }

        let block = self.memory.block(addr)?.clone();
        self.stats.record(kind, false);

        let installed = self.policy.install(set_index, set, CacheLine::new(tag, block));
        if let Some(victim) = &installed.evicted {
            trace!(set = set_index, evicted = victim.tag, installed = tag, "evicted line");
        }
        Ok((set_index, installed.way, offset))
    }

    /// Checks whether the block holding `addr` is resident, without touching
    /// statistics or recency.
    pub fn contains(&self, addr: Address) -> bool {
        let codec = &self.geometry.codec;
        self.sets[codec.set_index(addr)].find(codec.tag(addr)).is_some()
    }

    /// Hit/miss counters accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The validated geometry of this cache.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// The replacement policy in use.
    pub fn policy(&self) -> PolicyType {
        self.policy.kind()
    }

    /// All sets, indexed by set index.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Number of valid lines in set `set_index`.
    pub fn set_occupancy(&self, set_index: usize) -> usize {
        self.sets.get(set_index).map_or(0, CacheSet::occupancy)
    }

    /// Tags of the valid lines in set `set_index`, in slot order.
    ///
    /// For LRU this is most- to least-recently used.
    pub fn resident_tags(&self, set_index: usize) -> Vec<u64> {
        self.sets.get(set_index).map(CacheSet::tags).unwrap_or_default()
    }

    /// The backing memory store.
    pub const fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Mutable access to the backing store, bypassing the cache.
    ///
    /// Used to seed the working set; accesses through this handle are not
    /// counted and do not affect resident lines.
    pub const fn memory_mut(&mut self) -> &mut MemoryStore {
        &mut self.memory
    }

    /// Consumes the engine, returning the backing store.
    pub fn into_memory(self) -> MemoryStore {
        self.memory
    }
}
