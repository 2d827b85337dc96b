//! Set-associative cache simulator library.
//!
//! This crate models a single-level set-associative cache in front of a
//! simulated main memory, for studying the hit/miss behavior of numeric
//! kernels under different replacement policies. It provides:
//! 1. **Addressing:** Decomposition of 32-bit addresses into tag, set index, and offset.
//! 2. **Memory:** The block store consulted on every miss.
//! 3. **Cache:** The engine with Random, FIFO, and LRU replacement.
//! 4. **Simulation:** Configuration, execution unit, kernels, and statistics.

/// Cache engine, lines, sets, and replacement policies.
pub mod cache;
/// Common types and constants (addresses, access types, errors).
pub mod common;
/// Simulator configuration (defaults, enums, validated geometry).
pub mod config;
/// Execution unit forwarding loads and stores to the cache.
pub mod cpu;
/// Simulated main memory (blocks and the backing store).
pub mod memory;
/// Benchmark kernels and the simulation driver.
pub mod sim;
/// Cache hit/miss statistics and reporting.
pub mod stats;

/// Cache engine; construct with `CacheEngine::new`.
pub use crate::cache::CacheEngine;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
