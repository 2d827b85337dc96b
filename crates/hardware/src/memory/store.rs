//! Backing Memory Store.
//!
//! The store is a flat array of blocks sized to the working set of a run. It
//! is the source of truth the cache consults on every miss, and the path the
//! benchmark layer uses to seed operands without touching the cache.

use tracing::debug;

use super::block::Block;
use crate::common::addr::{Address, ceil_log2};
use crate::common::constants::ELEMENT_SIZE;
use crate::common::error::{ConfigError, SimError};

/// Simulated main memory: `num_blocks` blocks of `block_len` elements.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    blocks: Vec<Block>,
    block_len: usize,
    offset_bits: u32,
}

impl MemoryStore {
    /// Allocates a zero-filled store.
    ///
    /// # Errors
    ///
    /// Fails if either count is zero or if `block_len` is not a power of two.
    pub fn new(num_blocks: usize, block_len: usize) -> Result<Self, ConfigError> {
        if num_blocks == 0 {
            return Err(ConfigError::Zero { field: "num_blocks" });
        }
        if block_len == 0 {
            return Err(ConfigError::Zero { field: "block_len" });
        }
        if !block_len.is_power_of_two() {
            return Err(ConfigError::BlockLengthNotPowerOfTwo { block_len });
        }

        debug!(num_blocks, block_len, "allocating memory store");
        Ok(Self {
            blocks: vec![Block::new(block_len); num_blocks],
            block_len,
            offset_bits: ceil_log2(block_len),
        })
    }

    /// Number of blocks in the store.
    pub const fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Elements per block.
    pub const fn block_len(&self) -> usize {
        self.block_len
    }

    /// Total store size in bytes.
    pub const fn size_bytes(&self) -> usize {
        self.blocks.len() * self.block_len * ELEMENT_SIZE
    }

    /// Resolves `addr` to `(block_index, offset)`, checking bounds.
    fn locate(&self, addr: Address) -> Result<(usize, usize), SimError> {
        let element = addr.element_index() as usize;
        let block_index = element >> self.offset_bits;
        if block_index >= self.blocks.len() {
            return Err(SimError::AddressOutOfRange {
                address: addr.val(),
                block_index,
                num_blocks: self.blocks.len(),
            });
        }
        Ok((block_index, element & (self.block_len - 1)))
    }

    /// Returns the resident block holding `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`] if the block index is past the
    /// end of the store.
    pub fn block(&self, addr: Address) -> Result<&Block, SimError> {
        let (index, _) = self.locate(addr)?;
        Ok(&self.blocks[index])
    }

    /// Reads the element at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`] for addresses outside the store.
    pub fn read(&self, addr: Address) -> Result<f64, SimError> {
        let (index, offset) = self.locate(addr)?;
        Ok(self.blocks[index][offset])
    }

    /// Writes `value` to the element at `addr` in place.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`] for addresses outside the store.
    pub fn write(&mut self, addr: Address, value: f64) -> Result<(), SimError> {
        let (index, offset) = self.locate(addr)?;
        self.blocks[index][offset] = value;
        Ok(())
    }
}
