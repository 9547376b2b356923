//! Instruction Decode (DE) Stage.
//!
//! This module implements the decode stage. It performs the following:
//! 1. **Control Store:** Looks up the control word addressed by IR\[15:11\] and IR\[5\].
//! 2. **Register Read:** Reads SR1 and SR2, the latter from IR\[11:9\] for stores.
//! 3. **Writeback:** Commits the Store stage's register and condition-code writes after
//!    the reads, so a value retiring this cycle is not visible until the next one.
//! 4. **Dependency Check:** Stalls on any unretired writer of a needed source.

use crate::common::bits::Bits3;
use crate::common::constants::LINK_REGISTER;
use crate::core::Cpu;
use crate::core::arch::DecodeSignals;
use crate::core::pipeline::hazards::check_for_data_dependencies;
use crate::core::pipeline::latches::{AgexLatch, InstructionRecord, PipeState};
use crate::core::pipeline::signals::{AgexControlSignals, DecodeControlSignals, DrMux};
use crate::isa::instruction::InstructionBits;

/// Executes the decode stage of the pipeline.
///
/// Writeback and the condition-code update happen every cycle, even when the decode
/// latch holds a bubble.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `latches` - The latches as they stood at the start of the cycle
/// * `next` - The latches being built for the next cycle
pub fn decode_stage(cpu: &mut Cpu, latches: &PipeState, next: &mut PipeState) {
    let mem_stall = cpu.state.signals.stall.mem_stall;
    let latch = &latches.decode;

    let Some(instr) = latch.instr else {
        let cc = commit_writeback(cpu);
        cpu.state.signals.decode = DecodeSignals {
            cc,
            ..DecodeSignals::default()
        };
        cpu.state.signals.stall.dep_stall = false;
        cpu.state.signals.stall.v_de_br_stall = false;
        next.agex = if mem_stall {
            latches.agex
        } else {
            AgexLatch::bubble()
        };
        return;
    };
    let valid = latch.valid;
    let ir = instr.ir;

    let word = cpu.control_store.word(ir.control_store_address());
    let cs = DecodeControlSignals::from_word(word);

    let sr1 = ir.sr1();
    let sr2 = if ir.at::<13>() { ir.dr() } else { ir.sr2() };
    let sr1_data = cpu.state.regs.read(sr1);
    let sr2_data = cpu.state.regs.read(sr2);

    let cc = commit_writeback(cpu);

    let dep_stall = check_for_data_dependencies(valid, &cs, sr1, sr2, &cpu.state.signals);
    cpu.state.signals.stall.dep_stall = dep_stall;
    cpu.state.signals.stall.v_de_br_stall = valid && cs.br_stall;
    cpu.state.signals.decode = DecodeSignals {
        word,
        sr1,
        sr2,
        sr1_data,
        sr2_data,
        cc,
    };

    if cpu.trace && valid {
        tracing::trace!(
            cycle = cpu.cycles,
            pc = %format_args!("x{:04X}", instr.pc),
            ir = %format_args!("x{ir:04X}"),
            row = ir.control_store_address().value(),
            dep_stall,
            "DE"
        );
    }

    let drid = match cs.dr_mux {
        DrMux::R7 => Bits3::new(LINK_REGISTER),
        DrMux::Ir11_9 => ir.dr(),
    };

    next.agex = if mem_stall {
        latches.agex
    } else {
        AgexLatch {
            valid: valid && !dep_stall,
            instr: Some(InstructionRecord {
                sr1: sr1_data,
                sr2: sr2_data,
                cc,
                drid,
                ..instr
            }),
            cs: AgexControlSignals::from_word(word),
        }
    };
}

/// Applies Store's register write, then reads and updates the condition codes.
///
/// Returns the condition codes as they were before the update.
fn commit_writeback(cpu: &mut Cpu) -> Bits3 {
    let store = cpu.state.signals.store;
    if store.v_ld_reg {
        cpu.state.regs.write(store.drid, store.reg_data);
    }
    cpu.state.get_nzp(store.v_ld_cc)
}
