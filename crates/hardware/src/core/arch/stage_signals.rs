//! Per-cycle stage signals.
//!
//! Stages run in reverse order (Store, Memory, AGEX, Decode, Fetch). Each one
//! overwrites its record here before any upstream stage reads it, so within a
//! cycle these always describe the instruction currently occupying that stage.
//! Nothing here survives to the next cycle except by being recomputed.

use crate::common::bits::{Bits3, Word};
use crate::core::microcode::ControlWord;
use crate::core::pipeline::signals::PcMux;

/// Published by Store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreSignals {
    /// Value selected for writeback.
    pub reg_data: Word,
    /// Destination register id.
    pub drid: Bits3,
    /// A valid occupant writes `drid` this cycle.
    pub v_ld_reg: bool,
    /// A valid occupant writes the condition codes this cycle.
    pub v_ld_cc: bool,
    /// `reg_data` is negative.
    pub n: bool,
    /// `reg_data` is zero.
    pub z: bool,
    /// `reg_data` is positive.
    pub p: bool,
}

/// Published by Memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemorySignals {
    /// Branch or jump target (the occupant's ADDRESS).
    pub target_pc: Word,
    /// Trap target, or the loaded value.
    pub trap_pc: Word,
    /// Next-PC select.
    pub pc_mux: PcMux,
    /// Destination register id.
    pub drid: Bits3,
    /// A valid occupant will write `drid`.
    pub v_ld_reg: bool,
    /// A valid occupant will write the condition codes.
    pub v_ld_cc: bool,
}

/// Published by AGEX.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgexSignals {
    /// Destination register id.
    pub drid: Bits3,
    /// A valid occupant will write `drid`.
    pub v_ld_reg: bool,
    /// A valid occupant will write the condition codes.
    pub v_ld_cc: bool,
}

/// Published by Decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeSignals {
    /// Control word fetched for the occupant.
    pub word: ControlWord,
    /// First source register id.
    pub sr1: Bits3,
    /// Second source register id.
    pub sr2: Bits3,
    /// Value read for `sr1`.
    pub sr1_data: Word,
    /// Value read for `sr2`.
    pub sr2_data: Word,
    /// Condition codes as read this cycle.
    pub cc: Bits3,
}

/// Stall and hazard flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StallSignals {
    /// The instruction cache answered this cycle.
    pub icache_ready: bool,
    /// Decode's occupant depends on an unretired result.
    pub dep_stall: bool,
    /// A valid control instruction is in Decode.
    pub v_de_br_stall: bool,
    /// A valid control instruction is in AGEX.
    pub v_agex_br_stall: bool,
    /// A valid control instruction is in Memory.
    pub v_mem_br_stall: bool,
    /// The data cache was enabled and not ready.
    pub mem_stall: bool,
}

/// Every stage signal record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageSignals {
    /// Decode.
    pub decode: DecodeSignals,
    /// AGEX.
    pub agex: AgexSignals,
    /// Memory.
    pub memory: MemorySignals,
    /// Store.
    pub store: StoreSignals,
    /// Stalls.
    pub stall: StallSignals,
}
