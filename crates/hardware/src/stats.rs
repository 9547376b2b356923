//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the LC-3b pipeline. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Retired counts by category (ALU, load, store, control, trap).
//! 3. **Stalls:** Data-dependency, memory, control, and instruction-cache stall cycles.
//! 4. **Redirects:** Taken branches, jumps, and traps resolved in the Memory stage.

use std::io::{self, Write};
use std::time::Instant;

use crate::common::bits::Word;
use crate::core::arch::StallSignals;
use crate::core::pipeline::hazards::is_branch_taken;
use crate::core::pipeline::signals::PcMux;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{
    OP_ADD, OP_AND, OP_BR, OP_JMP, OP_JSR, OP_LDB, OP_LDW, OP_LEA, OP_SHF, OP_STB, OP_STW,
    OP_TRAP, OP_XOR,
};

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of valid instructions that reached the Store stage.
    pub instructions_retired: u64,

    /// Retired LDB/LDW.
    pub inst_load: u64,
    /// Retired STB/STW.
    pub inst_store: u64,
    /// Retired BR/JSR/JSRR/JMP.
    pub inst_control: u64,
    /// Retired ADD/AND/XOR/SHF/LEA.
    pub inst_alu: u64,
    /// Retired TRAP.
    pub inst_trap: u64,
    /// Retired words with a reserved opcode.
    pub inst_other: u64,

    /// Cycles in which Decode waited on an unretired result.
    pub stalls_data: u64,
    /// Cycles in which the data cache was enabled and not ready.
    pub stalls_mem: u64,
    /// Cycles in which a control instruction held the front end and the PC did not load.
    pub stalls_control: u64,
    /// Cycles in which the instruction cache was not ready.
    pub icache_misses: u64,
    /// Taken redirects of the PC by Memory.
    pub redirects: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_load: 0,
            inst_store: 0,
            inst_control: 0,
            inst_alu: 0,
            inst_trap: 0,
            inst_other: 0,
            stalls_data: 0,
            stalls_mem: 0,
            stalls_control: 0,
            icache_misses: 0,
            redirects: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "stalls", "instruction_mix"];

impl SimStats {
    /// Counts one retired instruction by its opcode.
    pub fn record_retire(&mut self, ir: Word) {
        self.instructions_retired += 1;
        match ir.opcode() {
            OP_LDB | OP_LDW => self.inst_load += 1,
            OP_STB | OP_STW => self.inst_store += 1,
            OP_BR | OP_JSR | OP_JMP => self.inst_control += 1,
            OP_ADD | OP_AND | OP_XOR | OP_SHF | OP_LEA => self.inst_alu += 1,
            OP_TRAP => self.inst_trap += 1,
            _ => self.inst_other += 1,
        }
    }

    /// Accumulates one cycle's stall flags and the Memory stage's next-PC select.
    pub fn record_cycle(&mut self, stall: &StallSignals, pc_mux: PcMux) {
        self.cycles += 1;
        if stall.dep_stall {
            self.stalls_data += 1;
        }
        if stall.mem_stall {
            self.stalls_mem += 1;
        }
        // A taken redirect loads the PC, so its cycle is not a control stall.
        let redirect = is_branch_taken(pc_mux) && !stall.mem_stall;
        let branch_held = stall.v_de_br_stall || stall.v_agex_br_stall || stall.v_mem_br_stall;
        if branch_held && !(redirect && stall.v_mem_br_stall) {
            self.stalls_control += 1;
        }
        if !stall.icache_ready {
            self.icache_misses += 1;
        }
        if redirect {
            self.redirects += 1;
        }
    }

    /// Writes the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty
    /// slice to write all sections.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_sections(&self, out: &mut impl Write, sections: &[String]) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        writeln!(out, "\n==========================================================")?;
        writeln!(out, "LC-3b PIPELINE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            writeln!(out, "host_seconds             {seconds:.4} s")?;
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "sim_freq                 {khz:.2} kHz")?;
            writeln!(out, "sim_insts                {}", self.instructions_retired)?;
            writeln!(
                out,
                "sim_ipc                  {:.4}",
                self.instructions_retired as f64 / cyc
            )?;
            writeln!(out, "sim_cpi                  {:.4}", cyc / instr)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("stalls") {
            writeln!(out, "STALLS")?;
            for (name, count) in [
                ("stalls.data", self.stalls_data),
                ("stalls.memory", self.stalls_mem),
                ("stalls.control", self.stalls_control),
                ("icache.misses", self.icache_misses),
            ] {
                writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count, cyc))?;
            }
            writeln!(out, "  {:<22} {}", "redirects", self.redirects)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("instruction_mix") {
            writeln!(out, "INSTRUCTION MIX")?;
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.control", self.inst_control),
                ("op.trap", self.inst_trap),
                ("op.other", self.inst_other),
            ] {
                writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count, instr))?;
            }
        }
        writeln!(out, "==========================================================")
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        let stdout = io::stdout();
        if let Err(err) = self.write_sections(&mut stdout.lock(), sections) {
            tracing::error!(%err, "failed to write statistics");
        }
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
