//! Store (SR) Stage.
//!
//! The last stage selects the value that will be written back and derives the
//! condition codes from it. The write itself is committed by Decode, which runs
//! later in the same cycle and so reads the register file before it changes.

use crate::core::Cpu;
use crate::core::arch::StoreSignals;
use crate::core::pipeline::latches::PipeState;
use crate::core::pipeline::signals::DrValueMux;

/// Executes the store stage of the pipeline.
///
/// Publishes [`StoreSignals`] for the dependency check and for Decode's writeback.
/// An empty latch publishes all-clear signals; load enables are gated by the valid bit.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `latches` - The latches as they stood at the start of the cycle
pub fn store_stage(cpu: &mut Cpu, latches: &PipeState) {
    let latch = &latches.store;
    let Some(instr) = latch.instr else {
        cpu.state.signals.store = StoreSignals::default();
        return;
    };

    let reg_data = match latch.cs.dr_value_mux {
        DrValueMux::Address => instr.address,
        DrValueMux::Data => instr.data,
        DrValueMux::Npc => instr.npc,
        DrValueMux::AluResult => instr.alu_result,
    };
    let n = reg_data.msb();
    let z = reg_data.is_zero();

    cpu.state.signals.store = StoreSignals {
        reg_data,
        drid: instr.drid,
        v_ld_reg: latch.valid && latch.cs.ld_reg,
        v_ld_cc: latch.valid && latch.cs.ld_cc,
        n,
        z,
        p: !n && !z,
    };

    if cpu.trace && latch.valid {
        tracing::trace!(
            cycle = cpu.cycles,
            pc = %format_args!("x{:04X}", instr.pc),
            value = %format_args!("x{reg_data:04X}"),
            ld_reg = latch.cs.ld_reg,
            "SR"
        );
    }
}
