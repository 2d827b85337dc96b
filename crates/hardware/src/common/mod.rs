//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Address Types:** The strong 32-bit address type and its field codec.
//! 2. **Constants:** Machine-wide widths for addresses and elements.
//! 3. **Memory Access:** Read/write classification of cache accesses.
//! 4. **Error Handling:** Configuration and simulation error types.

/// Address type and address-field decomposition.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration and simulation.
pub mod error;

pub use addr::{Address, AddressCodec, DecodedAddress};
pub use constants::{ADDRESS_WIDTH, ELEMENT_SIZE};
pub use data::AccessType;
pub use error::{ConfigError, SimError};
