//! Memory Access Types.
//!
//! This module defines the classification of cache accesses. It is used for:
//! 1. **Statistics Tracking:** Routing each access to the read or write counters.
//! 2. **Write Allocation:** Deciding whether the resident block is mutated after
//!    the lookup completes.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Data read access.
    ///
    /// Occurs during load instructions when reading an element into a register.
    Read,

    /// Data write access.
    ///
    /// Occurs during store instructions. Writes allocate on miss and mutate the
    /// cache-resident block only.
    Write,
}
