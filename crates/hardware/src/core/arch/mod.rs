//! LC-3b architectural state.
//!
//! This module contains the state visible to software and the per-cycle wires
//! between stages. It includes the following modules:
//! 1. **State:** Program counter, condition codes, and the register file.
//! 2. **Stage Signals:** Hazard-relevant facts each stage publishes for the stages that
//!    run after it in the same cycle, plus the stall bundle.

/// Per-cycle stage signals and the stall bundle.
pub mod stage_signals;

/// Program counter, condition codes, and register file.
pub mod state;

pub use stage_signals::{
    AgexSignals, DecodeSignals, MemorySignals, StageSignals, StallSignals, StoreSignals,
};
pub use state::ArchState;
