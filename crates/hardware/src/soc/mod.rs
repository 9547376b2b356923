//! Memory System Components.
//!
//! The LC-3b pipeline sees a single two-bank main memory through two ports:
//! an instruction-cache port used by Fetch and a data-cache port used by the
//! Memory stage. Neither port models real cache state; each asks a latency
//! model whether it is ready this cycle.

/// Main memory and cache-port latency models.
pub mod memory;

pub use memory::MainMemory;
pub use memory::controller::{AlwaysReady, CycleModulo, LatencyModel};
