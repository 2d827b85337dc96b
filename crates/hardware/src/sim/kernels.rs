//! Benchmark Kernels.
//!
//! The kernels generate the access streams the cache is studied under. Each
//! one lays its three operands `a`, `b`, `c` out back-to-back from address 0
//! with 8-byte elements, seeds them directly in the memory store, and then
//! drives the execution unit.

use tracing::debug;

use crate::common::addr::Address;
use crate::common::constants::ELEMENT_SIZE;
use crate::common::error::SimError;
use crate::config::Kernel;
use crate::cpu::Cpu;
use crate::memory::MemoryStore;

/// Scalar multiplier `D` used by daxpy.
pub const DAXPY_SCALAR: f64 = 3.0;

/// Placement of the three operands in the simulated address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandLayout {
    /// Vector length or matrix dimension.
    pub dimension: usize,
    /// Elements per operand.
    pub len: u64,
}

impl OperandLayout {
    /// Lays out operands for `kernel` at `dimension`.
    pub const fn new(kernel: Kernel, dimension: usize) -> Self {
        let n = dimension as u64;
        let len = match kernel {
            Kernel::Daxpy => n,
            Kernel::Mxm | Kernel::MxmBlock => n * n,
        };
        Self { dimension, len }
    }

    /// Address of element `index` of the operand starting at element `base`.
    ///
    /// The working set is validated against the address space before a
    /// layout is used, so the byte offset always fits in 32 bits.
    const fn element(base: u64, index: usize) -> Address {
        Address::new(((base + index as u64) * ELEMENT_SIZE as u64) as u32)
    }

    /// Address of `a[index]` (row-major for matrices).
    pub const fn a(&self, index: usize) -> Address {
        Self::element(0, index)
    }

    /// Address of `b[index]`.
    pub const fn b(&self, index: usize) -> Address {
        Self::element(self.len, index)
    }

    /// Address of `c[index]`.
    pub const fn c(&self, index: usize) -> Address {
        Self::element(2 * self.len, index)
    }

    /// Row-major index of `(row, col)`.
    #[inline]
    pub const fn at(&self, row: usize, col: usize) -> usize {
        row * self.dimension + col
    }
}

/// Seeds the operands directly in the store, bypassing the cache.
///
/// daxpy uses `a = 1, b = 2, c = 0`; the matrix kernels use `a = 1, b = 1, c = 0`.
///
/// # Errors
///
/// Returns [`SimError::AddressOutOfRange`] if the store is smaller than the layout.
pub fn seed(memory: &mut MemoryStore, kernel: Kernel, layout: &OperandLayout) -> Result<(), SimError> {
    let b_value = match kernel {
        Kernel::Daxpy => 2.0,
        Kernel::Mxm | Kernel::MxmBlock => 1.0,
    };
    for i in 0..layout.len as usize {
        memory.write(layout.a(i), 1.0)?;
        memory.write(layout.b(i), b_value)?;
        memory.write(layout.c(i), 0.0)?;
    }
    debug!(%kernel, elements = layout.len, "operands seeded");
    Ok(())
}

/// `c[i] = D * a[i] + b[i]`.
///
/// # Errors
///
/// Propagates bounds errors from the cache engine.
pub fn daxpy(cpu: &mut Cpu<'_>, layout: &OperandLayout) -> Result<(), SimError> {
    for i in 0..layout.dimension {
        let a = cpu.load(layout.a(i))?;
        let scaled = cpu.mul(DAXPY_SCALAR, a);
        let b = cpu.load(layout.b(i))?;
        let sum = cpu.add(scaled, b);
        cpu.store(layout.c(i), sum)?;
    }
    Ok(())
}

/// Naive `C = A * B`; each `c[i][j]` is accumulated in a register and stored once.
///
/// # Errors
///
/// Propagates bounds errors from the cache engine.
pub fn mxm(cpu: &mut Cpu<'_>, layout: &OperandLayout) -> Result<(), SimError> {
    let n = layout.dimension;
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..n {
                let a = cpu.load(layout.a(layout.at(i, k)))?;
                let b = cpu.load(layout.b(layout.at(k, j)))?;
                let product = cpu.mul(a, b);
                acc = cpu.add(acc, product);
            }
            cpu.store(layout.c(layout.at(i, j)), acc)?;
        }
    }
    Ok(())
}

/// Blocked `C = A * B` with `blocking_factor`-wide tiles over `j` and `k`.
///
/// Each partial sum is loaded from `c[i][j]`, accumulated over one `k` tile,
/// and stored back.
///
/// # Errors
///
/// Propagates bounds errors from the cache engine.
pub fn mxm_block(
    cpu: &mut Cpu<'_>,
    layout: &OperandLayout,
    blocking_factor: usize,
) -> Result<(), SimError> {
    let n = layout.dimension;
    let bf = blocking_factor.max(1);
    for jj in (0..n).step_by(bf) {
        for kk in (0..n).step_by(bf) {
            for i in 0..n {
                for j in jj..(jj + bf).min(n) {
                    let c = layout.c(layout.at(i, j));
                    let mut acc = cpu.load(c)?;
                    for k in kk..(kk + bf).min(n) {
                        let a = cpu.load(layout.a(layout.at(i, k)))?;
                        let b = cpu.load(layout.b(layout.at(k, j)))?;
                        let product = cpu.mul(a, b);
                        acc = cpu.add(acc, product);
                    }
                    cpu.store(c, acc)?;
                }
            }
        }
    }
    Ok(())
}
