//! Data Block Implementation.
//!
//! A block is the unit of transfer between the memory store and the cache: a
//! fixed-length run of `f64` elements. Its identity is purely positional; no
//! address is stored inside it.

use std::ops::{Index, IndexMut};

/// A fixed-length sequence of `f64` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    data: Box<[f64]>,
}

impl Block {
    /// Creates a zero-filled block of `len` elements.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![0.0; len].into_boxed_slice(),
        }
    }

    /// Returns the number of elements in the block.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for a zero-length block.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl Index<usize> for Block {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Block {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}
