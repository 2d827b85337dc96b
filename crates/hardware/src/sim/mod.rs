//! Simulation driver and benchmark kernels.
//!
//! Provides the kernels that generate access streams and the simulator that
//! wires memory, cache, and execution unit together for one run.

/// Benchmark kernels (daxpy, mxm, blocked mxm) and operand layout.
pub mod kernels;

/// Simulator construction, execution, and reporting.
pub mod simulator;

pub use kernels::OperandLayout;
pub use simulator::{RunSummary, Simulator};
