//! Instruction Fetch (FE) Stage.
//!
//! This module implements the first stage of the pipeline. It performs the following:
//! 1. **Instruction Cache:** Reads the word at PC, noting whether the port was ready.
//! 2. **Next PC:** Picks PC + 2, the branch target, or the trap target from Memory's select.
//! 3. **Stall Control:** Loads PC only when no stall is detected, and loads the Decode
//!    latch unless a data-dependency or memory stall is freezing it.
//!
//! Fetch runs last in the cycle, so every stall flag it consults is already final.

use crate::common::bits::Word;
use crate::common::constants::INSTRUCTION_BYTES;
use crate::core::Cpu;
use crate::core::pipeline::hazards::is_stall_detected;
use crate::core::pipeline::history::TraceArena;
use crate::core::pipeline::latches::{DecodeLatch, InstructionRecord, PipeState};
use crate::core::pipeline::signals::PcMux;

/// Executes the fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `history` - Trace arena; a trace is started for every valid fetch
/// * `latches` - The latches as they stood at the start of the cycle
/// * `next` - The latches being built for the next cycle
pub fn fetch_stage(
    cpu: &mut Cpu,
    history: &mut TraceArena,
    latches: &PipeState,
    next: &mut PipeState,
) {
    let pc = cpu.state.pc;
    let response = cpu.memory.icache_access(pc, cpu.cycles);
    cpu.state.signals.stall.icache_ready = response.ready;

    let npc = pc + Word::new(INSTRUCTION_BYTES);
    let memory = cpu.state.signals.memory;
    let new_pc = match memory.pc_mux {
        PcMux::Sequential => npc,
        PcMux::BranchTarget => memory.target_pc,
        PcMux::TrapVector => memory.trap_pc,
    };

    let stall = cpu.state.signals.stall;
    let load_pc = !is_stall_detected(&stall, memory.pc_mux);
    if load_pc {
        cpu.state.pc = new_pc;
    }

    if cpu.trace {
        tracing::trace!(
            cycle = cpu.cycles,
            pc = %format_args!("x{pc:04X}"),
            icache_ready = response.ready,
            load_pc,
            new_pc = %format_args!("x{new_pc:04X}"),
            "FE"
        );
    }

    if stall.dep_stall || stall.mem_stall {
        next.decode = latches.decode;
        return;
    }

    let valid = load_pc && !stall.v_mem_br_stall;
    let trace = valid.then(|| history.allocate(pc, response.word, cpu.cycles));
    next.decode = DecodeLatch {
        valid,
        instr: Some(InstructionRecord {
            trace,
            ir: response.word,
            pc,
            npc,
            ..InstructionRecord::default()
        }),
        cs: (),
    };
}
