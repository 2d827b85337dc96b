//! Simulated Address type and field decomposition.
//!
//! This module defines the strong address type and the codec that splits it
//! into cache fields. It provides the following:
//! 1. **Type Safety:** `Address` wraps a 32-bit byte address so it cannot be
//!    mixed up with tags, set indices, or block indices.
//! 2. **Decomposition:** `AddressCodec` turns an address into
//!    `{tag, set_index, offset, block_index}` given the configured field widths.
//! 3. **Composition:** The inverse mapping, used to reconstruct addresses from
//!    cache fields.
//!
//! The unit of addressing is the 8-byte element: the low three bits of a byte
//! address are dropped before any field is extracted.

use std::fmt;

use super::constants::{ADDRESS_WIDTH, ELEMENT_SHIFT};
use super::error::ConfigError;

/// A byte address in the simulated 32-bit address space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u32);

impl Address {
    /// Creates a new address from a raw byte offset.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw byte offset.
    #[inline(always)]
    pub const fn val(&self) -> u32 {
        self.0
    }

    /// Returns the index of the 8-byte element this address falls in.
    #[inline(always)]
    pub const fn element_index(&self) -> u32 {
        self.0 >> ELEMENT_SHIFT
    }

    /// Returns the address of the `index`-th element, if it fits in 32 bits.
    pub fn from_element(index: u64) -> Option<Self> {
        let bytes = index.checked_mul(1 << ELEMENT_SHIFT)?;
        u32::try_from(bytes).ok().map(Self)
    }
}

impl From<u32> for Address {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// The fields of an address as seen by the cache and the memory store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// High-order bits identifying which memory block occupies a line.
    pub tag: u64,
    /// Cache set the block maps to (`block_index % num_sets`).
    pub set_index: usize,
    /// Element position within the block.
    pub offset: usize,
    /// Memory-relative block index (`element_index >> offset_bits`).
    pub block_index: usize,
}

/// Returns `ceil(log2(n))`; both `0` and `1` map to `0`.
pub const fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// Splits addresses into `{tag, set_index, offset}` for a fixed cache geometry.
///
/// Memory blocks map onto cache sets by wraparound: the set index is the block
/// index modulo the number of sets and the tag is the quotient. When the set
/// count is a power of two this is exactly a bit split at `index_bits`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressCodec {
    num_sets: usize,
    index_bits: u32,
    offset_bits: u32,
    tag_bits: u32,
}

impl AddressCodec {
    /// Creates a codec for a cache of `num_sets` sets holding blocks of
    /// `block_len` elements.
    ///
    /// # Errors
    ///
    /// Fails if either count is zero, if `block_len` is not a power of two, or
    /// if the index and offset fields do not fit in an address.
    pub fn new(num_sets: usize, block_len: usize) -> Result<Self, ConfigError> {
        if num_sets == 0 {
            return Err(ConfigError::Zero { field: "num_sets" });
        }
        if block_len == 0 {
            return Err(ConfigError::Zero { field: "block_len" });
        }
        if !block_len.is_power_of_two() {
            return Err(ConfigError::BlockLengthNotPowerOfTwo { block_len });
        }

        let index_bits = ceil_log2(num_sets);
        let offset_bits = ceil_log2(block_len);
        let available_bits = ADDRESS_WIDTH - ELEMENT_SHIFT;
        if index_bits + offset_bits > available_bits {
            return Err(ConfigError::FieldsExceedAddressWidth {
                index_bits,
                offset_bits,
                available_bits,
            });
        }

        Ok(Self {
            num_sets,
            index_bits,
            offset_bits,
            tag_bits: ADDRESS_WIDTH - index_bits - offset_bits,
        })
    }

    /// Width of the set-index field.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the offset field.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the tag field.
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Number of sets addresses are spread over.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Element position of `addr` within its block.
    #[inline]
    pub const fn offset(&self, addr: Address) -> usize {
        (addr.element_index() & ((1u32 << self.offset_bits) - 1)) as usize
    }

    /// Memory-relative block index of `addr`.
    #[inline]
    pub const fn block_index(&self, addr: Address) -> usize {
        (addr.element_index() >> self.offset_bits) as usize
    }

    /// Cache set `addr` maps to.
    #[inline]
    pub const fn set_index(&self, addr: Address) -> usize {
        self.block_index(addr) % self.num_sets
    }

    /// Tag stored alongside the block of `addr`.
    #[inline]
    pub const fn tag(&self, addr: Address) -> u64 {
        (self.block_index(addr) / self.num_sets) as u64
    }

    /// Decodes every field of `addr` at once.
    #[inline]
    pub const fn decode(&self, addr: Address) -> DecodedAddress {
        let block_index = self.block_index(addr);
        DecodedAddress {
            tag: (block_index / self.num_sets) as u64,
            set_index: block_index % self.num_sets,
            offset: self.offset(addr),
            block_index,
        }
    }

    /// Rebuilds the element-aligned address holding `(tag, set_index, offset)`.
    ///
    /// Returns `None` if the fields are out of range for this geometry or the
    /// result does not fit in 32 bits.
    pub fn compose(&self, tag: u64, set_index: usize, offset: usize) -> Option<Address> {
        if set_index >= self.num_sets || offset >= (1usize << self.offset_bits) {
            return None;
        }
        let block_index = tag
            .checked_mul(self.num_sets as u64)?
            .checked_add(set_index as u64)?;
        let element = block_index
            .checked_mul(1u64 << self.offset_bits)?
            .checked_add(offset as u64)?;
        Address::from_element(element)
    }
}
