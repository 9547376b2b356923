//! Core processor implementation.
//!
//! This module contains the LC-3b processor: its architectural state, the
//! microcode ROM, the five-stage pipeline, and the execution units.

/// Architectural state and per-cycle stage signals.
pub mod arch;

/// CPU container shared by the stage functions.
pub mod cpu;

/// Control store and control words.
pub mod microcode;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU and shifter).
pub mod units;

pub use self::cpu::Cpu;
