//! Address Generation and Execute (AGEX) Stage.
//!
//! This module computes the two results every instruction may need downstream:
//! 1. **ADDRESS:** Base (NPC or SR1) plus a sign-extended, optionally doubled offset,
//!    or the zero-extended trap vector doubled.
//! 2. **ALU_RESULT:** The ALU on SR1 and SR2 or the immediate, or the shifter on SR1.
//!
//! While Memory is stalled the Memory-input latch holds its occupant.

use crate::common::bits::Word;
use crate::core::Cpu;
use crate::core::arch::AgexSignals;
use crate::core::pipeline::latches::{InstructionRecord, MemoryLatch, PipeState};
use crate::core::pipeline::signals::{
    Addr1Mux, Addr2Mux, AddressMux, AgexControlSignals, ResultMux, Sr2Mux,
};
use crate::core::units::alu::Alu;
use crate::core::units::alu::shifts::{self, ShiftKind};
use crate::isa::instruction::InstructionBits;

/// Executes the AGEX stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `latches` - The latches as they stood at the start of the cycle
/// * `next` - The latches being built for the next cycle
pub fn agex_stage(cpu: &mut Cpu, latches: &PipeState, next: &mut PipeState) {
    let mem_stall = cpu.state.signals.stall.mem_stall;
    let latch = &latches.agex;
    let Some(instr) = latch.instr else {
        cpu.state.signals.agex = AgexSignals::default();
        cpu.state.signals.stall.v_agex_br_stall = false;
        next.memory = if mem_stall {
            latches.memory
        } else {
            MemoryLatch::bubble()
        };
        return;
    };
    let cs = latch.cs;
    let valid = latch.valid;

    let address = compute_address(&cs, &instr);
    let alu_result = compute_result(&cs, &instr);

    cpu.state.signals.agex = AgexSignals {
        drid: instr.drid,
        v_ld_reg: valid && cs.mem.store.ld_reg,
        v_ld_cc: valid && cs.mem.store.ld_cc,
    };
    cpu.state.signals.stall.v_agex_br_stall = valid && cs.mem.br_stall;

    if cpu.trace && valid {
        tracing::trace!(
            cycle = cpu.cycles,
            pc = %format_args!("x{:04X}", instr.pc),
            address = %format_args!("x{address:04X}"),
            alu = %format_args!("x{alu_result:04X}"),
            "AGEX"
        );
    }

    next.memory = if mem_stall {
        latches.memory
    } else {
        MemoryLatch {
            valid,
            instr: Some(InstructionRecord {
                address,
                alu_result,
                ..instr
            }),
            cs: cs.mem,
        }
    };
}

fn compute_address(cs: &AgexControlSignals, instr: &InstructionRecord) -> Word {
    match cs.address_mux {
        AddressMux::TrapVector => instr.ir.zero_extend(7) << 1,
        AddressMux::Adder => {
            let base = match cs.addr1_mux {
                Addr1Mux::Npc => instr.npc,
                Addr1Mux::BaseR => instr.sr1,
            };
            let offset = match cs.addr2_mux {
                Addr2Mux::Zero => Word::ZERO,
                Addr2Mux::Offset6 => instr.ir.sign_extend(5),
                Addr2Mux::PcOffset9 => instr.ir.sign_extend(8),
                Addr2Mux::PcOffset11 => instr.ir.sign_extend(10),
            };
            let offset = if cs.lshf1 { offset << 1 } else { offset };
            base + offset
        }
    }
}

fn compute_result(cs: &AgexControlSignals, instr: &InstructionRecord) -> Word {
    match cs.alu_result_mux {
        ResultMux::Alu => {
            let operand = match cs.sr2_mux {
                Sr2Mux::Register => instr.sr2,
                Sr2Mux::Immediate => instr.ir.sign_extend(4),
            };
            Alu::execute(cs.aluk, instr.sr1, operand)
        }
        ResultMux::Shifter => shifts::execute(
            ShiftKind::from_bits(instr.ir.shift_type()),
            instr.sr1,
            instr.ir.shift_amount(),
        ),
    }
}
