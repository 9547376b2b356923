//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage LC-3b pipeline.
//! It includes the following components:
//! 1. **Engine:** The latch set and the per-cycle stage sequence.
//! 2. **Hazards:** Data-dependency detection and front-end stall arbitration.
//! 3. **History:** Per-instruction timing records for the timing diagram.
//! 4. **Latches:** Inter-stage buffers (DE, AGEX, MEM, SR).
//! 5. **Signals:** Per-stage control slices decoded from the control store.
//! 6. **Stages:** Implementation of Fetch, Decode, AGEX, Memory, and Store.

/// Pipeline clocking and latch ownership.
pub mod engine;

/// Dependency detection and stall arbitration.
pub mod hazards;

/// Per-instruction timing history.
pub mod history;

/// Inter-stage pipeline latches.
pub mod latches;

/// Control signals decoded from the control store.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, agex, memory, store).
pub mod stages;

pub use engine::Pipeline;
