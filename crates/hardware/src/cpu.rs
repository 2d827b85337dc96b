//! Execution Unit.
//!
//! A thin pass-through between the benchmark kernels and the cache engine. It
//! forwards loads and stores to the cache, performs floating-point add and
//! multiply, and counts every instruction it executes.

use crate::cache::CacheEngine;
use crate::common::addr::Address;
use crate::common::error::SimError;

/// Execution unit driving one cache engine.
#[derive(Debug)]
pub struct Cpu<'a> {
    /// Data cache all loads and stores go through.
    cache: &'a mut CacheEngine,
    /// Number of instructions executed (loads, stores, adds, multiplies).
    instructions: u64,
}

impl<'a> Cpu<'a> {
    /// Creates an execution unit issuing requests to `cache`.
    pub const fn new(cache: &'a mut CacheEngine) -> Self {
        Self {
            cache,
            instructions: 0,
        }
    }

    /// Loads the element at `addr` through the cache.
    ///
    /// # Errors
    ///
    /// Propagates bounds errors from the cache engine.
    pub fn load(&mut self, addr: Address) -> Result<f64, SimError> {
        self.instructions += 1;
        self.cache.read(addr)
    }

    /// Stores `value` at `addr` through the cache.
    ///
    /// # Errors
    ///
    /// Propagates bounds errors from the cache engine.
    pub fn store(&mut self, addr: Address, value: f64) -> Result<(), SimError> {
        self.instructions += 1;
        self.cache.write(addr, value)
    }

    /// Adds two register values.
    #[inline]
    pub fn add(&mut self, a: f64, b: f64) -> f64 {
        self.instructions += 1;
        a + b
    }

    /// Multiplies two register values.
    #[inline]
    pub fn mul(&mut self, a: f64, b: f64) -> f64 {
        self.instructions += 1;
        a * b
    }

    /// Number of instructions executed so far.
    pub const fn instructions(&self) -> u64 {
        self.instructions
    }
}
