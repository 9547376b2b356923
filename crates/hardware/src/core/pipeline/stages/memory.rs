//! Memory Access (MEM) Stage.
//!
//! This module implements the data-cache access of the pipeline. It performs the
//! following:
//! 1. **Data Cache:** Reads a word or byte, or writes the enabled byte planes.
//! 2. **Control Flow:** Resolves the next-PC select for branches, jumps and traps.
//! 3. **Stalling:** Raises the memory stall while the data cache is not ready, which
//!    freezes every upstream latch and inserts a bubble into Store.

use crate::common::bits::Word;
use crate::core::Cpu;
use crate::core::arch::MemorySignals;
use crate::core::pipeline::latches::{InstructionRecord, PipeState, StoreLatch};
use crate::core::pipeline::signals::{DataSize, MemoryControlSignals, PcMux};
use crate::isa::instruction::InstructionBits;
use crate::soc::memory::{CacheResponse, WriteEnable};

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `latches` - The latches as they stood at the start of the cycle
/// * `next` - The latches being built for the next cycle
pub fn memory_stage(cpu: &mut Cpu, latches: &PipeState, next: &mut PipeState) {
    let latch = &latches.memory;
    let Some(instr) = latch.instr else {
        cpu.state.signals.memory = MemorySignals::default();
        cpu.state.signals.stall.mem_stall = false;
        cpu.state.signals.stall.v_mem_br_stall = false;
        next.store = StoreLatch::bubble();
        return;
    };
    let cs = latch.cs;
    let valid = latch.valid;
    let odd = instr.address.at::<0>();

    let cache_en = cs.dcache_en && valid;
    let response = if cache_en {
        let (write_data, enable) = write_port(&cs, instr.alu_result, odd);
        cpu.memory
            .dcache_access(instr.address, write_data, enable, cpu.cycles)
    } else {
        CacheResponse {
            word: Word::ZERO,
            ready: true,
        }
    };
    let mem_stall = cache_en && !response.ready;

    let data = if cache_en {
        match cs.data_size {
            DataSize::Word => response.word,
            DataSize::Byte => {
                let byte = if odd {
                    response.word >> 8
                } else {
                    response.word.range::<7, 0, 8>().resize::<16>()
                };
                byte.sign_extend(7)
            }
        }
    } else {
        Word::ZERO
    };

    let pc_mux = resolve_pc_mux(valid, &cs, &instr);

    cpu.state.signals.memory = MemorySignals {
        target_pc: instr.address,
        trap_pc: data,
        pc_mux,
        drid: instr.drid,
        v_ld_reg: valid && cs.store.ld_reg,
        v_ld_cc: valid && cs.store.ld_cc,
    };
    cpu.state.signals.stall.mem_stall = mem_stall;
    cpu.state.signals.stall.v_mem_br_stall = valid && cs.br_stall;

    if cpu.trace && valid {
        tracing::trace!(
            cycle = cpu.cycles,
            pc = %format_args!("x{:04X}", instr.pc),
            address = %format_args!("x{:04X}", instr.address),
            dcache = cache_en,
            mem_stall,
            pc_mux = pc_mux.bits(),
            "MEM"
        );
    }

    next.store = StoreLatch {
        valid: valid && !mem_stall,
        instr: Some(InstructionRecord { data, ..instr }),
        cs: cs.store,
    };
}

/// Positions the outgoing data and picks the byte enables.
///
/// A byte store writes ALU_RESULT\[7:0\] into the plane selected by address bit 0.
fn write_port(cs: &MemoryControlSignals, alu_result: Word, odd: bool) -> (Word, WriteEnable) {
    if !cs.dcache_rw {
        return (alu_result, WriteEnable::NONE);
    }
    match cs.data_size {
        DataSize::Word => (alu_result, WriteEnable::WORD),
        DataSize::Byte => {
            let byte = alu_result.range::<7, 0, 8>().resize::<16>();
            if odd {
                (
                    byte << 8,
                    WriteEnable {
                        low: false,
                        high: true,
                    },
                )
            } else {
                (
                    byte,
                    WriteEnable {
                        low: true,
                        high: false,
                    },
                )
            }
        }
    }
}

fn resolve_pc_mux(valid: bool, cs: &MemoryControlSignals, instr: &InstructionRecord) -> PcMux {
    if !valid {
        return PcMux::Sequential;
    }
    if cs.br_op {
        if (instr.ir.nzp() & instr.cc).is_zero() {
            PcMux::Sequential
        } else {
            PcMux::BranchTarget
        }
    } else if cs.uncond_op {
        PcMux::BranchTarget
    } else if cs.trap_op {
        PcMux::TrapVector
    } else {
        PcMux::Sequential
    }
}
