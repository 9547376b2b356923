//! Pipeline clocking.
//!
//! [`Pipeline`] owns the latch set and the trace arena and advances them by one
//! clock edge at a time. Each cycle every stage reads the current latches and writes
//! the next ones; a latch that no stage writes keeps its value, which is how the
//! stall paths hold an occupant in place.

use crate::core::Cpu;
use crate::core::pipeline::history::TraceArena;
use crate::core::pipeline::latches::PipeState;
use crate::core::pipeline::stages::{
    agex_stage, decode_stage, fetch_stage, memory_stage, store_stage,
};

/// The latch set plus per-instruction history.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    current: PipeState,
    /// Timing records of in-flight and recently retired instructions.
    pub history: TraceArena,
}

impl Pipeline {
    /// Creates an empty pipeline keeping at most `history_limit` retired traces.
    pub fn new(history_limit: usize) -> Self {
        Self {
            current: PipeState::default(),
            history: TraceArena::new(history_limit),
        }
    }

    /// The latches as they stand between cycles.
    pub const fn latches(&self) -> &PipeState {
        &self.current
    }

    /// Mutable access to the latches, for seeding a pipeline state directly.
    pub const fn latches_mut(&mut self) -> &mut PipeState {
        &mut self.current
    }

    /// Empties every latch and drops all history.
    pub fn reset(&mut self) {
        self.current = PipeState::default();
        self.history.clear();
    }

    /// Advances one clock edge.
    ///
    /// Stages run Store, Memory, AGEX, Decode, Fetch so that each sees the signals its
    /// downstream neighbours produced this cycle. History is recorded against the
    /// pre-edge cycle count; the caller advances `cpu.cycles` afterwards.
    pub fn cycle(&mut self, cpu: &mut Cpu) {
        let current = self.current;
        let mut next = current;

        store_stage(cpu, &current);
        memory_stage(cpu, &current, &mut next);
        agex_stage(cpu, &current, &mut next);
        decode_stage(cpu, &current, &mut next);
        fetch_stage(cpu, &mut self.history, &current, &mut next);

        self.history.record(&current, &next, cpu.cycles);
        self.current = next;
    }
}
