//! Global Simulator Constants.
//!
//! This module defines the fixed machine parameters shared by the codec, the
//! memory store, and the kernels. It includes:
//! 1. **Address Constants:** Width of a simulated address.
//! 2. **Element Constants:** Size and shift of the 8-byte element that is the
//!    unit of addressing.

/// Width of a simulated address in bits.
pub const ADDRESS_WIDTH: u32 = 32;

/// Size of one stored element (`f64`) in bytes.
pub const ELEMENT_SIZE: usize = 8;

/// Number of low address bits dropped to turn a byte address into an element index.
pub const ELEMENT_SHIFT: u32 = 3;
