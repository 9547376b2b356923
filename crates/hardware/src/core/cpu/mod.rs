//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the container for everything the
//! stage functions operate on. It coordinates the following:
//! 1. **State Management:** PC, condition codes, registers, and per-cycle stage signals.
//! 2. **Memory:** The two-port main memory and its latency models.
//! 3. **Control:** The microcode ROM consulted in Decode.
//! 4. **Timing:** The cycle counter seen by the latency models.
//!
//! The pipeline latches live beside the `Cpu` in the
//! [`Simulator`](crate::sim::simulator::Simulator), not inside it, so stage functions
//! borrow both without any back-references.

use crate::config::Config;
use crate::core::arch::ArchState;
use crate::core::microcode::ControlStore;
use crate::soc::MainMemory;

/// Processor state shared by all stage functions.
#[derive(Debug)]
pub struct Cpu {
    /// PC, condition codes, registers, and stage signals.
    pub state: ArchState,
    /// Main memory.
    pub memory: MainMemory,
    /// Microcode ROM.
    pub control_store: ControlStore,
    /// Cycles completed so far.
    pub cycles: u64,
    /// Emit per-stage trace events.
    pub trace: bool,
}

impl Cpu {
    /// Creates a CPU in its power-on state.
    ///
    /// # Arguments
    ///
    /// * `control_store` - The microcode image.
    /// * `config` - Latency and tracing settings.
    pub fn new(control_store: ControlStore, config: &Config) -> Self {
        Self {
            state: ArchState::new(),
            memory: MainMemory::new(&config.memory),
            control_store,
            cycles: 0,
            trace: config.general.trace_instructions,
        }
    }

    /// Restores the power-on state of PC, condition codes, registers, and the
    /// cycle counter. Memory contents and the control store are kept.
    pub fn reset(&mut self) {
        self.state = ArchState::new();
        self.cycles = 0;
    }
}
