//! Cache statistics collection and reporting.
//!
//! This module tracks hit/miss behavior for one cache engine. It provides:
//! 1. **Counters:** Read hits, read misses, write hits, and write misses.
//! 2. **Derived metrics:** Access totals and miss rates.
//! 3. **Reporting:** The results section printed at the end of a run.
//!
//! Every access increments exactly one counter. Counters are never decremented
//! or reset during a run; a fresh engine starts with fresh counters.

use std::fmt::Write as _;

use crate::common::data::AccessType;

/// Hit/miss counters for one cache engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads served by a resident line.
    pub read_hits: u64,
    /// Reads that fetched a block from memory.
    pub read_misses: u64,
    /// Writes applied to a resident line.
    pub write_hits: u64,
    /// Writes that fetched a block from memory before applying.
    pub write_misses: u64,
}

impl CacheStats {
    /// Records the outcome of one access.
    #[inline]
    pub const fn record(&mut self, kind: AccessType, hit: bool) {
        match (kind, hit) {
            (AccessType::Read, true) => self.read_hits += 1,
            (AccessType::Read, false) => self.read_misses += 1,
            (AccessType::Write, true) => self.write_hits += 1,
            (AccessType::Write, false) => self.write_misses += 1,
        }
    }

    /// Total reads issued.
    pub const fn reads(&self) -> u64 {
        self.read_hits + self.read_misses
    }

    /// Total writes issued.
    pub const fn writes(&self) -> u64 {
        self.write_hits + self.write_misses
    }

    /// Total accesses issued.
    pub const fn accesses(&self) -> u64 {
        self.reads() + self.writes()
    }

    /// Read miss rate in percent, `0.0` when no reads were issued.
    pub fn read_miss_rate(&self) -> f64 {
        percent(self.read_misses, self.reads())
    }

    /// Write miss rate in percent, `0.0` when no writes were issued.
    pub fn write_miss_rate(&self) -> f64 {
        percent(self.write_misses, self.writes())
    }

    /// Renders the counter lines of the results report.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Read hits:         {}", self.read_hits);
        let _ = writeln!(out, "Read misses:       {}", self.read_misses);
        let _ = writeln!(out, "Read miss rate:    {:.2}%", self.read_miss_rate());
        let _ = writeln!(out, "Write hits:        {}", self.write_hits);
        let _ = writeln!(out, "Write misses:      {}", self.write_misses);
        let _ = writeln!(out, "Write miss rate:   {:.2}%", self.write_miss_rate());
        out
    }
}

/// `part / total` as a percentage; the division is skipped when `total` is zero.
fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}
