//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines what is carried across the four stage boundaries of the
//! LC-3b pipeline: Fetch → Decode → AGEX → Memory → Store.
//!
//! 1. **Instruction Flow:** An [`InstructionRecord`] holds the datapath values of one
//!    dynamic instruction and is copied, not shared, from latch to latch.
//! 2. **Control Narrowing:** Each latch carries the control slice its consumers still need.
//! 3. **Double Buffering:** [`PipeState`] is one complete set of latches; the pipeline keeps
//!    a current and a next copy and swaps them on every clock edge.

use crate::common::bits::{Bits3, Word};
use crate::core::pipeline::history::TraceId;
use crate::core::pipeline::signals::{AgexControlSignals, MemoryControlSignals, StoreControlSignals};

/// Datapath values of one in-flight instruction.
///
/// Fields are filled in as the instruction advances: Fetch sets `ir`, `pc` and `npc`,
/// Decode adds `sr1`, `sr2`, `cc` and `drid`, AGEX adds `address` and `alu_result`,
/// and Memory adds `data`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstructionRecord {
    /// Diagnostic handle into the trace arena; ignored by the datapath.
    pub trace: Option<TraceId>,
    /// Instruction word.
    pub ir: Word,
    /// Fetch address.
    pub pc: Word,
    /// Address of the next sequential instruction.
    pub npc: Word,
    /// First source operand value.
    pub sr1: Word,
    /// Second source operand value.
    pub sr2: Word,
    /// Condition codes captured in Decode, `n` in bit 2.
    pub cc: Bits3,
    /// Destination register id.
    pub drid: Bits3,
    /// ALU or shifter result.
    pub alu_result: Word,
    /// Computed memory or control-flow address.
    pub address: Word,
    /// Loaded data, or the trap target for a trap.
    pub data: Word,
}

/// One pipeline register: an occupant, its valid bit, and its control slice.
///
/// An empty or invalid latch is a bubble.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Latch<C> {
    /// Valid bit.
    pub valid: bool,
    /// The occupant, if any.
    pub instr: Option<InstructionRecord>,
    /// Control fields for the consuming stage.
    pub cs: C,
}

impl<C: Default> Latch<C> {
    /// An empty, invalid latch.
    pub fn bubble() -> Self {
        Self {
            valid: false,
            instr: None,
            cs: C::default(),
        }
    }

    /// The occupant when it is valid.
    pub fn live(&self) -> Option<&InstructionRecord> {
        self.instr.as_ref().filter(|_| self.valid)
    }
}

/// Decode-input latch. Control comes from the control store in Decode itself.
pub type DecodeLatch = Latch<()>;
/// AGEX-input latch.
pub type AgexLatch = Latch<AgexControlSignals>;
/// Memory-input latch.
pub type MemoryLatch = Latch<MemoryControlSignals>;
/// Store-input latch.
pub type StoreLatch = Latch<StoreControlSignals>;

/// A full set of latches, one per stage boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipeState {
    /// Fetch → Decode.
    pub decode: DecodeLatch,
    /// Decode → AGEX.
    pub agex: AgexLatch,
    /// AGEX → Memory.
    pub memory: MemoryLatch,
    /// Memory → Store.
    pub store: StoreLatch,
}
