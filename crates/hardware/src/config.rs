//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a simulation run. It provides:
//! 1. **Defaults:** Baseline cache geometry and workload parameters.
//! 2. **Structures:** Cache and workload configuration, plus the validated
//!    [`CacheGeometry`] derived from them.
//! 3. **Enums:** Replacement policy and benchmark kernel selection.
//!
//! Configuration is supplied via JSON (`Config::from_json_file`) or built from
//! `Config::default()` and overridden field by field by the CLI.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::addr::AddressCodec;
use crate::common::constants::{ADDRESS_WIDTH, ELEMENT_SIZE};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline run when not explicitly overridden in a
/// JSON configuration file or on the command line.
mod defaults {
    /// Default cache size in bytes (512 KiB).
    pub const CACHE_SIZE: usize = 524_288;

    /// Default cache block size in bytes (64 bytes, eight `f64` elements).
    pub const BLOCK_SIZE: usize = 64;

    /// Default cache associativity (2-way).
    pub const ASSOCIATIVITY: usize = 2;

    /// Default vector length or matrix dimension.
    pub const DIMENSION: usize = 480;

    /// Default blocking factor for the blocked matrix multiply.
    pub const BLOCKING_FACTOR: usize = 32;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line receives a block
/// fetched on a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementPolicy {
    /// Random replacement policy.
    ///
    /// Fills empty lines first, then evicts a uniformly drawn line.
    #[serde(alias = "Random")]
    Random,
    /// First In First Out replacement policy.
    ///
    /// Installs at a rotating per-set cursor, even while other lines are empty.
    #[serde(alias = "FIFO", alias = "Fifo")]
    Fifo,
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line that was accessed least recently.
    #[default]
    #[serde(alias = "LRU", alias = "Lru")]
    Lru,
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "Random"),
            Self::Fifo => write!(f, "FIFO"),
            Self::Lru => write!(f, "LRU"),
        }
    }
}

/// Benchmark kernels that generate the access stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    /// `c = D * a + b` over vectors of length `dimension`.
    Daxpy,
    /// Naive `C = A * B` over square matrices.
    Mxm,
    /// Blocked `C = A * B` using the configured blocking factor.
    #[default]
    MxmBlock,
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daxpy => write!(f, "daxpy"),
            Self::Mxm => write!(f, "mxm"),
            Self::MxmBlock => write!(f, "mxm_block"),
        }
    }
}

/// Root configuration for one simulation run.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{Config, Kernel, ReplacementPolicy};
///
/// let json = r#"{
///     "cache": { "size_bytes": 512, "block_bytes": 64, "associativity": 2, "policy": "fifo" },
///     "workload": { "kernel": "daxpy", "dimension": 16 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.policy, ReplacementPolicy::Fifo);
/// assert_eq!(config.workload.kernel, Kernel::Daxpy);
/// assert_eq!(config.workload.blocking_factor, 32);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Cache geometry and policy
    #[serde(default)]
    pub cache: CacheConfig,
    /// Benchmark kernel and problem size
    #[serde(default)]
    pub workload: WorkloadConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are malformed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&text)
    }
}

/// Cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Block (line) size in bytes
    #[serde(default = "CacheConfig::default_block")]
    pub block_bytes: usize,

    /// Associativity (lines per set)
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Seed for the random policy's eviction draws; entropy-seeded when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    const fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default block size in bytes.
    const fn default_block() -> usize {
        defaults::BLOCK_SIZE
    }

    /// Returns the default associativity.
    const fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Validates the sizing parameters and derives the cache geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any size is zero, if the sizes do not
    /// divide evenly (element into block, block into cache, ways into blocks),
    /// or if the resulting address fields do not fit.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        if self.size_bytes == 0 {
            return Err(ConfigError::Zero { field: "size_bytes" });
        }
        if self.block_bytes == 0 {
            return Err(ConfigError::Zero { field: "block_bytes" });
        }
        if self.associativity == 0 {
            return Err(ConfigError::Zero { field: "associativity" });
        }
        if self.block_bytes % ELEMENT_SIZE != 0 {
            return Err(ConfigError::BlockNotElementMultiple {
                block_bytes: self.block_bytes,
                element_bytes: ELEMENT_SIZE,
            });
        }
        if self.size_bytes % self.block_bytes != 0 {
            return Err(ConfigError::CacheNotBlockMultiple {
                cache_bytes: self.size_bytes,
                block_bytes: self.block_bytes,
            });
        }

        let num_blocks = self.size_bytes / self.block_bytes;
        if num_blocks % self.associativity != 0 {
            return Err(ConfigError::BlocksNotWayMultiple {
                num_blocks,
                associativity: self.associativity,
            });
        }

        let num_sets = num_blocks / self.associativity;
        let block_len = self.block_bytes / ELEMENT_SIZE;
        let codec = AddressCodec::new(num_sets, block_len)?;

        Ok(CacheGeometry {
            size_bytes: self.size_bytes,
            block_bytes: self.block_bytes,
            block_len,
            num_blocks,
            num_sets,
            associativity: self.associativity,
            codec,
        })
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// 512 KiB, 64-byte blocks, 2-way set-associative, LRU replacement.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            block_bytes: defaults::BLOCK_SIZE,
            associativity: defaults::ASSOCIATIVITY,
            policy: ReplacementPolicy::default(),
            seed: None,
        }
    }
}

/// Validated cache sizing, derived once from a [`CacheConfig`].
///
/// Holds `num_sets * associativity == num_blocks` and a codec whose field
/// widths match the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    /// Total cache size in bytes.
    pub size_bytes: usize,
    /// Block size in bytes.
    pub block_bytes: usize,
    /// Elements per block.
    pub block_len: usize,
    /// Number of blocks the cache holds.
    pub num_blocks: usize,
    /// Number of sets.
    pub num_sets: usize,
    /// Lines per set.
    pub associativity: usize,
    /// Address decomposition for this geometry.
    pub codec: AddressCodec,
}

impl CacheGeometry {
    /// Width of the set-index field.
    pub const fn index_bits(&self) -> u32 {
        self.codec.index_bits()
    }

    /// Width of the offset field.
    pub const fn offset_bits(&self) -> u32 {
        self.codec.offset_bits()
    }

    /// Width of the tag field.
    pub const fn tag_bits(&self) -> u32 {
        self.codec.tag_bits()
    }
}

/// Benchmark workload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkloadConfig {
    /// Kernel generating the access stream
    #[serde(default)]
    pub kernel: Kernel,

    /// Vector length (daxpy) or matrix dimension (`mxm`, `mxm_block`)
    #[serde(default = "WorkloadConfig::default_dimension")]
    pub dimension: usize,

    /// Tile edge for the blocked matrix multiply
    #[serde(default = "WorkloadConfig::default_blocking_factor")]
    pub blocking_factor: usize,

    /// Print the results report after the run
    #[serde(default = "WorkloadConfig::default_print_stats")]
    pub print_stats: bool,
}

impl WorkloadConfig {
    /// Returns the default problem dimension.
    const fn default_dimension() -> usize {
        defaults::DIMENSION
    }

    /// Returns the default blocking factor.
    const fn default_blocking_factor() -> usize {
        defaults::BLOCKING_FACTOR
    }

    /// Results are printed unless disabled.
    const fn default_print_stats() -> bool {
        true
    }

    /// Number of elements in one operand (`n` for vectors, `n * n` for matrices).
    pub const fn operand_len(&self) -> u64 {
        let n = self.dimension as u64;
        match self.kernel {
            Kernel::Daxpy => n,
            Kernel::Mxm | Kernel::MxmBlock => n.saturating_mul(n),
        }
    }

    /// Number of memory blocks needed to hold the three operands `a`, `b`, `c`.
    ///
    /// # Errors
    ///
    /// Fails if the dimension (or the blocking factor of a blocked kernel) is
    /// zero, or if the working set does not fit in the address space.
    pub fn memory_blocks(&self, block_len: usize) -> Result<usize, ConfigError> {
        if self.dimension == 0 {
            return Err(ConfigError::Zero { field: "dimension" });
        }
        if self.kernel == Kernel::MxmBlock && self.blocking_factor == 0 {
            return Err(ConfigError::Zero {
                field: "blocking_factor",
            });
        }
        if block_len == 0 {
            return Err(ConfigError::Zero { field: "block_len" });
        }

        let elements = self.operand_len().saturating_mul(3);
        let blocks = elements.div_ceil(block_len as u64);
        let bytes = blocks
            .saturating_mul(block_len as u64)
            .saturating_mul(ELEMENT_SIZE as u64);
        if bytes > 1u64 << ADDRESS_WIDTH {
            return Err(ConfigError::WorkingSetTooLarge {
                bytes,
                address_width: ADDRESS_WIDTH,
            });
        }
        Ok(blocks as usize)
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            kernel: Kernel::default(),
            dimension: defaults::DIMENSION,
            blocking_factor: defaults::BLOCKING_FACTOR,
            print_stats: true,
        }
    }
}
