//! Memory store tests.
//!
//! Covers allocation validation, element reads and writes, block lookup, and
//! bounds checking.

use cachesim_core::common::{Address, ConfigError, SimError};
use cachesim_core::memory::{Block, MemoryStore};
use pretty_assertions::assert_eq;

use crate::common::indexed_memory;

#[test]
fn new_store_is_zero_filled() {
    let store = MemoryStore::new(4, 8).unwrap();
    assert_eq!(store.num_blocks(), 4);
    assert_eq!(store.block_len(), 8);
    assert_eq!(store.size_bytes(), 256);
    for element in 0..32 {
        assert_eq!(store.read(Address::from_element(element).unwrap()).unwrap(), 0.0);
    }
}

#[test]
fn new_rejects_invalid_sizes() {
    assert_eq!(
        MemoryStore::new(0, 8).unwrap_err(),
        ConfigError::Zero { field: "num_blocks" }
    );
    assert_eq!(
        MemoryStore::new(4, 0).unwrap_err(),
        ConfigError::Zero { field: "block_len" }
    );
    assert_eq!(
        MemoryStore::new(4, 6).unwrap_err(),
        ConfigError::BlockLengthNotPowerOfTwo { block_len: 6 }
    );
}

#[test]
fn write_then_read_round_trips() {
    let mut store = MemoryStore::new(4, 8).unwrap();
    store.write(Address::new(0x48), 6.5).unwrap();

    assert_eq!(store.read(Address::new(0x48)).unwrap(), 6.5);
    // Any byte inside the same element addresses it.
    assert_eq!(store.read(Address::new(0x4F)).unwrap(), 6.5);
    assert_eq!(store.read(Address::new(0x50)).unwrap(), 0.0);
}

#[test]
fn block_returns_whole_containing_block() {
    let store = indexed_memory(4, 8);
    let block = store.block(Address::new(0x58)).unwrap();

    assert_eq!(block.len(), 8);
    assert_eq!(block.as_slice(), &[8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
}

#[test]
fn out_of_range_address_is_an_error() {
    let mut store = MemoryStore::new(4, 8).unwrap();
    let expected = SimError::AddressOutOfRange {
        address: 256,
        block_index: 4,
        num_blocks: 4,
    };

    assert_eq!(store.read(Address::new(256)), Err(expected.clone()));
    assert_eq!(store.write(Address::new(256), 1.0), Err(expected.clone()));
    assert_eq!(store.block(Address::new(256)).unwrap_err(), expected);
    // The last valid element is still reachable.
    assert!(store.read(Address::new(255)).is_ok());
}

#[test]
fn blocks_are_independent_copies() {
    let store = indexed_memory(2, 8);
    let mut copy: Block = store.block(Address::new(0)).unwrap().clone();
    copy[0] = 99.0;

    assert_eq!(store.read(Address::new(0)).unwrap(), 0.0);
    assert_eq!(copy[0], 99.0);
}
