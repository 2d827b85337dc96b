//! Cache lines and sets.
//!
//! A line is one slot of a set: a validity flag, a tag, and the block it owns.
//! A set is a bounded, ordered collection of lines whose capacity equals the
//! associativity and never changes after construction.

use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

use crate::memory::Block;

/// Cache line entry containing validity, tag, and the resident block.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,
    /// Tag of the resident block.
    pub tag: u64,
    /// The resident block, owned exclusively by this line.
    pub block: Block,
}

impl CacheLine {
    /// Creates a valid line owning `block`.
    pub const fn new(tag: u64, block: Block) -> Self {
        Self {
            valid: true,
            tag,
            block,
        }
    }

    /// Creates an invalid placeholder line with a zeroed block.
    pub fn invalid(block_len: usize) -> Self {
        Self {
            valid: false,
            tag: 0,
            block: Block::new(block_len),
        }
    }

    /// Returns `true` if the line is valid and holds `tag`.
    #[inline]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}

/// One cache set: at most `capacity` lines, kept in policy-defined order.
///
/// Array-style policies (Random, FIFO) pre-fill every slot with an invalid
/// line; recency-ordered policies (LRU) start empty and grow at the front.
#[derive(Debug, Clone)]
pub struct CacheSet {
    lines: VecDeque<CacheLine>,
    capacity: usize,
}

impl CacheSet {
    /// Creates a set with every slot holding an invalid line.
    pub fn filled(capacity: usize, block_len: usize) -> Self {
        Self {
            lines: (0..capacity).map(|_| CacheLine::invalid(block_len)).collect(),
            capacity,
        }
    }

    /// Creates a set with no lines.
    pub fn empty(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of lines (the associativity).
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of line slots currently present, valid or not.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the set holds no line slots.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns `true` if every slot is taken by a valid line.
    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.capacity && self.lines.iter().all(|l| l.valid)
    }

    /// Number of valid lines.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|l| l.valid).count()
    }

    /// Iterates over the line slots in order.
    pub fn lines(&self) -> impl Iterator<Item = &CacheLine> {
        self.lines.iter()
    }

    /// Tags of the valid lines, in slot order.
    pub fn tags(&self) -> Vec<u64> {
        self.lines.iter().filter(|l| l.valid).map(|l| l.tag).collect()
    }

    /// Finds the way holding a valid line tagged `tag`.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|l| l.matches(tag))
    }

    /// Finds the first invalid slot.
    pub fn first_invalid(&self) -> Option<usize> {
        self.lines.iter().position(|l| !l.valid)
    }

    /// Overwrites the slot at `way`, returning the line it held.
    pub(crate) fn replace(&mut self, way: usize, line: CacheLine) -> CacheLine {
        std::mem::replace(&mut self.lines[way], line)
    }

    /// Inserts `line` as the first slot.
    pub(crate) fn push_front(&mut self, line: CacheLine) {
        self.lines.push_front(line);
    }

    /// Removes and returns the last slot.
    pub(crate) fn pop_back(&mut self) -> Option<CacheLine> {
        self.lines.pop_back()
    }

    /// Moves the slot at `way` to the front, preserving the order of the rest.
    ///
    /// O(`way`): the lines ahead of it shift back by one.
    pub(crate) fn move_to_front(&mut self, way: usize) {
        if way == 0 {
            return;
        }
        if let Some(line) = self.lines.remove(way) {
            self.lines.push_front(line);
        }
    }
}

impl Index<usize> for CacheSet {
    type Output = CacheLine;

    fn index(&self, way: usize) -> &Self::Output {
        &self.lines[way]
    }
}

impl IndexMut<usize> for CacheSet {
    fn index_mut(&mut self, way: usize) -> &mut Self::Output {
        &mut self.lines[way]
    }
}
