//! Hazard Detection and Stall Control.
//!
//! The pipeline has no forwarding network, so every hazard is resolved by stalling.
//! This module provides:
//! 1. **Dependency Check:** Detects when Decode's occupant reads a register or the
//!    condition codes that an older, unretired instruction still has to write.
//! 2. **Stall Arbitration:** Combines the stall sources into the single decision of
//!    whether the PC and the Decode latch may load this cycle.
//! 3. **Redirect Detection:** Reports whether Memory is steering Fetch away from PC + 2.

use crate::common::bits::Bits3;
use crate::core::arch::{StageSignals, StallSignals};
use crate::core::pipeline::signals::{DecodeControlSignals, PcMux};

/// Checks whether the instruction in Decode must wait for an older result.
///
/// A source register is a hazard when it is marked as needed and any of AGEX, Memory
/// or Store holds a valid writer of that register. A conditional branch is a hazard
/// while any of those stages holds a valid condition-code writer. Store counts because
/// its write lands in the register file only after Decode has read it.
///
/// # Arguments
///
/// * `valid` - Whether Decode's occupant is valid; a bubble never depends on anything.
/// * `cs` - Decode control fields of the occupant.
/// * `sr1` - First source register id.
/// * `sr2` - Second source register id.
/// * `signals` - Signals already published this cycle by Store, Memory and AGEX.
///
/// # Returns
///
/// `true` if Decode must stall.
pub fn check_for_data_dependencies(
    valid: bool,
    cs: &DecodeControlSignals,
    sr1: Bits3,
    sr2: Bits3,
    signals: &StageSignals,
) -> bool {
    if !valid {
        return false;
    }

    let writers = [
        (signals.agex.v_ld_reg, signals.agex.drid),
        (signals.memory.v_ld_reg, signals.memory.drid),
        (signals.store.v_ld_reg, signals.store.drid),
    ];
    let reg_hazard = writers.iter().any(|&(writes, drid)| {
        writes && ((cs.sr1_needed && drid == sr1) || (cs.sr2_needed && drid == sr2))
    });

    let cc_in_flight =
        signals.agex.v_ld_cc || signals.memory.v_ld_cc || signals.store.v_ld_cc;

    reg_hazard || (cs.br_op && cc_in_flight)
}

/// Whether Memory is redirecting Fetch this cycle.
#[inline]
pub fn is_branch_taken(pc_mux: PcMux) -> bool {
    pc_mux != PcMux::Sequential
}

/// Decides whether the front end stalls this cycle.
///
/// Any of an instruction-cache miss, a data dependency, a data-cache miss, or a
/// control instruction in Decode, AGEX or Memory stalls the front end. The one
/// exception is a control instruction in Memory that is redirecting Fetch: that cycle
/// loads the new PC even though the fetched word is discarded, so the branch and
/// instruction-cache stalls are waived. Data-dependency and data-cache stalls are
/// never waived.
///
/// # Returns
///
/// `true` if PC and the Decode latch must hold.
pub fn is_stall_detected(stall: &StallSignals, pc_mux: PcMux) -> bool {
    if stall.dep_stall || stall.mem_stall {
        return true;
    }
    if stall.v_mem_br_stall && is_branch_taken(pc_mux) {
        return false;
    }
    !stall.icache_ready || stall.v_de_br_stall || stall.v_agex_br_stall || stall.v_mem_br_stall
}
