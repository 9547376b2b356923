//! Simulation driver, program loading, and diagnostic dumps.
//!
//! Provides the [`Simulator`](simulator::Simulator) that clocks the pipeline, the
//! loaders for microcode and program files, and the printable state snapshots.

/// Register, memory, latch, control-store, and timing dumps.
pub mod dump;

/// Microcode and program file loading.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

pub use simulator::Simulator;
