//! Simulated Main Memory.
//!
//! This module implements the memory behind the cache. It provides:
//! 1. **Block:** The fixed-size unit of transfer between memory and cache.
//! 2. **Store:** The flat, bounds-checked array of blocks holding the working set.

/// Fixed-length element blocks.
pub mod block;

/// Backing store consulted on every cache miss.
pub mod store;

pub use block::Block;
pub use store::MemoryStore;
