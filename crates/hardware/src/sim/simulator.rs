//! Simulator: owns the cache engine and replays one benchmark kernel.
//!
//! The simulator sizes the memory store to the kernel's working set, builds
//! the cache in front of it, seeds the operands, and drives the kernel through
//! a fresh execution unit. It also renders the input banner and the results
//! report.

use std::fmt::Write as _;

use tracing::info;

use super::kernels::{self, OperandLayout};
use crate::cache::CacheEngine;
use crate::common::error::{ConfigError, SimError};
use crate::config::{Config, Kernel};
use crate::cpu::Cpu;
use crate::memory::MemoryStore;
use crate::stats::CacheStats;

/// Counters produced by one kernel run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Cache hit/miss counters at the end of the run.
    pub stats: CacheStats,
    /// Instructions executed by the kernel.
    pub instructions: u64,
}

/// Top-level simulator: configuration plus the cache engine it built.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    layout: OperandLayout,
    cache: CacheEngine,
}

impl Simulator {
    /// Builds the memory store and cache engine described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache geometry or the workload is
    /// invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.clone(),
            layout: OperandLayout::new(config.workload.kernel, config.workload.dimension),
            cache: Self::build_cache(config)?,
        })
    }

    /// Builds a cold cache in front of a zeroed store sized to the working set.
    fn build_cache(config: &Config) -> Result<CacheEngine, ConfigError> {
        let geometry = config.cache.geometry()?;
        let num_blocks = config.workload.memory_blocks(geometry.block_len)?;
        let memory = MemoryStore::new(num_blocks, geometry.block_len)?;
        CacheEngine::new(&config.cache, memory)
    }

    /// Seeds the operands and runs the configured kernel.
    ///
    /// Every run starts from a cold cache, fresh counters, and freshly seeded
    /// operands, so repeated runs of a deterministic policy return identical
    /// summaries.
    ///
    /// Results are not checked against the memory store: the cache never
    /// writes back, so stores made through it are not visible there.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`] if the kernel touches an
    /// address outside the working set, or [`SimError::Config`] if the cache
    /// cannot be rebuilt.
    pub fn run(&mut self) -> Result<RunSummary, SimError> {
        self.cache = Self::build_cache(&self.config)?;
        let workload = &self.config.workload;
        kernels::seed(self.cache.memory_mut(), workload.kernel, &self.layout)?;

        info!(kernel = %workload.kernel, dimension = workload.dimension, "running kernel");
        let mut cpu = Cpu::new(&mut self.cache);
        match workload.kernel {
            Kernel::Daxpy => kernels::daxpy(&mut cpu, &self.layout)?,
            Kernel::Mxm => kernels::mxm(&mut cpu, &self.layout)?,
            Kernel::MxmBlock => kernels::mxm_block(&mut cpu, &self.layout, workload.blocking_factor)?,
        }
        let instructions = cpu.instructions();

        let stats = *self.cache.stats();
        info!(instructions, accesses = stats.accesses(), "kernel finished");
        Ok(RunSummary {
            stats,
            instructions,
        })
    }

    /// The configuration this simulator was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The cache engine.
    pub const fn cache(&self) -> &CacheEngine {
        &self.cache
    }

    /// Renders the banner describing the run's inputs.
    pub fn inputs_report(&self) -> String {
        let geometry = self.cache.geometry();
        let workload = &self.config.workload;
        let mut out = String::new();
        let _ = writeln!(out, "INPUTS====================================");
        let _ = writeln!(out, "Ram Size =                   {} bytes", self.cache.memory().size_bytes());
        let _ = writeln!(out, "Cache Size =                 {} bytes", geometry.size_bytes);
        let _ = writeln!(out, "Block Size =                 {}", geometry.block_bytes);
        let _ = writeln!(out, "Total Blocks in Cache =      {}", geometry.num_blocks);
        let _ = writeln!(out, "Associativity =              {}", geometry.associativity);
        let _ = writeln!(out, "Number of Sets =             {}", geometry.num_sets);
        let _ = writeln!(out, "Replacement Policy =         {}", self.cache.policy());
        let _ = writeln!(out, "Algorithm =                  {}", workload.kernel);
        if workload.kernel == Kernel::MxmBlock {
            let _ = writeln!(out, "MXM Blocking Factor =        {}", workload.blocking_factor);
        }
        let _ = writeln!(out, "Matrix or Vector dimension = {}", workload.dimension);
        out
    }

    /// Renders the results section for `summary`.
    pub fn results_report(&self, summary: &RunSummary) -> String {
        let geometry = self.cache.geometry();
        let mut out = String::new();
        let _ = writeln!(out, "RESULTS====================================");
        let _ = writeln!(
            out,
            "Address: index/tag/offset: {}/{}/{}",
            geometry.index_bits(),
            geometry.tag_bits(),
            geometry.offset_bits()
        );
        let _ = writeln!(out, "Instruction count: {}", summary.instructions);
        out.push_str(&summary.stats.report());
        out
    }
}
