//! Configuration and Simulation Error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Configuration Errors:** Inconsistent sizing parameters detected once at
//!    construction time; no partially built engine is ever returned.
//! 2. **Simulation Errors:** Bounds violations raised when an address decodes to
//!    a block outside the memory store. These indicate a caller bug and abort
//!    the run.

use thiserror::Error;

use crate::config::ReplacementPolicy;

/// Errors raised while validating a configuration or building a component.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A count or size that must be positive was zero.
    #[error("{field} must be positive")]
    Zero {
        /// Name of the offending parameter.
        field: &'static str,
    },

    /// The block size is not a whole number of elements.
    #[error("block size {block_bytes} B is not a multiple of the {element_bytes} B element size")]
    BlockNotElementMultiple {
        /// Configured block size in bytes.
        block_bytes: usize,
        /// Element size in bytes.
        element_bytes: usize,
    },

    /// The cache size is not a whole number of blocks.
    #[error("cache size {cache_bytes} B is not a multiple of the {block_bytes} B block size")]
    CacheNotBlockMultiple {
        /// Configured cache size in bytes.
        cache_bytes: usize,
        /// Configured block size in bytes.
        block_bytes: usize,
    },

    /// The number of cache blocks does not split evenly into sets.
    #[error("{num_blocks} cache blocks cannot be split into sets of {associativity} ways")]
    BlocksNotWayMultiple {
        /// Number of blocks in the cache.
        num_blocks: usize,
        /// Configured associativity.
        associativity: usize,
    },

    /// The offset field could not address every element of a block exactly.
    #[error("block length of {block_len} elements is not a power of two")]
    BlockLengthNotPowerOfTwo {
        /// Number of elements per block.
        block_len: usize,
    },

    /// Index and offset fields together are wider than an element index.
    #[error("index ({index_bits} bits) and offset ({offset_bits} bits) exceed the {available_bits} bits of an element index")]
    FieldsExceedAddressWidth {
        /// Width of the set-index field.
        index_bits: u32,
        /// Width of the offset field.
        offset_bits: u32,
        /// Address bits left once the element bits are dropped.
        available_bits: u32,
    },

    /// The memory store was built with a different block length than the cache.
    #[error("memory store blocks hold {memory} elements but cache blocks hold {cache}")]
    BlockLengthMismatch {
        /// Elements per cache block.
        cache: usize,
        /// Elements per memory block.
        memory: usize,
    },

    /// A replacement policy was built for a different cache shape.
    #[error("{policy} policy was built for a different shape than {sets} sets of {ways} ways")]
    PolicyGeometryMismatch {
        /// Policy that rejected the geometry.
        policy: ReplacementPolicy,
        /// Number of sets in the cache.
        sets: usize,
        /// Associativity of the cache.
        ways: usize,
    },

    /// The working set does not fit in the simulated address space.
    #[error("working set of {bytes} B does not fit in a {address_width}-bit address space")]
    WorkingSetTooLarge {
        /// Requested working set size in bytes.
        bytes: u64,
        /// Width of an address.
        address_width: u32,
    },

    /// The configuration file could not be read.
    #[error("cannot read config {path}: {reason}")]
    Io {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// The configuration document could not be parsed.
    #[error("invalid config: {0}")]
    Parse(String),
}

/// Errors raised while the simulation is running.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// An address decoded to a block index outside the memory store.
    #[error("address {address:#010x} maps to block {block_index}, outside a store of {num_blocks} blocks")]
    AddressOutOfRange {
        /// The raw byte address.
        address: u32,
        /// The decoded memory block index.
        block_index: usize,
        /// Number of blocks in the store.
        num_blocks: usize,
    },

    /// The simulator could not be built from its configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
