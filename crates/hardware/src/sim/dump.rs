//! Diagnostic Dumps.
//!
//! Snapshots of simulator state taken on request and rendered through [`fmt::Display`],
//! so the same text can go to the terminal and to a dump file:
//! 1. **Registers:** Cycle count, PC, condition codes, and R0 through R7.
//! 2. **Memory:** An inclusive byte-address range, one word per line.
//! 3. **Latches:** Every pipeline latch plus the last cycle's stall flags.
//! 4. **Control store:** All 64 rows as bit strings.
//! 5. **Timing diagram:** One row per traced instruction, one column per cycle.

use std::fmt;

use crate::common::bits::{Bits3, Word};
use crate::common::reg::RegisterFile;
use crate::core::arch::StallSignals;
use crate::core::microcode::ControlWord;
use crate::core::pipeline::history::InstructionTrace;
use crate::core::pipeline::latches::{InstructionRecord, Latch, PipeState};
use crate::core::pipeline::signals::PcMux;
use crate::isa::disasm::disassemble;

const RULE: &str = "-------------------------------------";

/// Architectural state at a point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterDump {
    /// Cycles completed.
    pub cycles: u64,
    /// Program counter.
    pub pc: Word,
    /// Condition codes, `n` in bit 2.
    pub cc: Bits3,
    /// Register file.
    pub regs: RegisterFile,
}

impl fmt::Display for RegisterDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nCurrent architectural state :")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Cycle Count : {}", self.cycles)?;
        writeln!(f, "PC          : 0x{:04x}", self.pc)?;
        writeln!(
            f,
            "CCs: N = {}  Z = {}  P = {}",
            self.cc.value() >> 2,
            (self.cc.value() >> 1) & 1,
            self.cc.value() & 1
        )?;
        writeln!(f, "Registers:")?;
        for (k, value) in self.regs.iter().enumerate() {
            writeln!(f, "{k}: 0x{value:04x}")?;
        }
        Ok(())
    }
}

/// Contents of a byte-address range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryDump {
    /// First byte address requested.
    pub start: u16,
    /// Last byte address requested.
    pub stop: u16,
    /// `(byte address, word)` pairs in address order.
    pub words: Vec<(u16, Word)>,
}

impl fmt::Display for MemoryDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nMemory content [0x{:04x}..0x{:04x}] :", self.start, self.stop)?;
        writeln!(f, "{RULE}")?;
        for (addr, word) in &self.words {
            writeln!(f, "  0x{addr:04x} ({addr}) : 0x{word:04x}")?;
        }
        Ok(())
    }
}

/// Pipeline latches and the stall flags that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatchDump {
    /// Cycles completed.
    pub cycles: u64,
    /// Program counter.
    pub pc: Word,
    /// Latch contents.
    pub latches: PipeState,
    /// Stall flags from the last cycle.
    pub stall: StallSignals,
    /// Next-PC select from the last cycle.
    pub pc_mux: PcMux,
}

/// Writes a latch's valid bit, PC, NPC and IR, returning the occupant for further fields.
fn write_latch<C>(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    latch: &Latch<C>,
) -> Result<Option<InstructionRecord>, fmt::Error> {
    let Some(instr) = latch.instr else {
        writeln!(f, "{prefix}_V : 0 (empty)")?;
        return Ok(None);
    };
    writeln!(f, "{prefix}_V : {}", u8::from(latch.valid))?;
    write_field(f, prefix, "PC", hex(instr.pc))?;
    write_field(f, prefix, "NPC", hex(instr.npc))?;
    write_field(
        f,
        prefix,
        "IR",
        format!("{}  ({})", hex(instr.ir), disassemble(instr.ir.value() as u16)),
    )?;
    Ok(Some(instr))
}

fn write_field(f: &mut fmt::Formatter<'_>, prefix: &str, name: &str, value: String) -> fmt::Result {
    writeln!(f, "{:<16}: {value}", format!("{prefix}_{name}"))
}

fn hex(value: Word) -> String {
    format!("0x{value:04x}")
}

impl fmt::Display for LatchDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nCurrent pipeline state :")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Cycle Count : {}", self.cycles)?;
        writeln!(f, "PC          : 0x{:04x}\n", self.pc)?;

        let _ = write_latch(f, "DE", &self.latches.decode)?;
        writeln!(f)?;

        if let Some(i) = write_latch(f, "AGEX", &self.latches.agex)? {
            write_field(f, "AGEX", "CS", format!("{:?}", self.latches.agex.cs))?;
            write_field(f, "AGEX", "SR1", hex(i.sr1))?;
            write_field(f, "AGEX", "SR2", hex(i.sr2))?;
            write_field(f, "AGEX", "CC", format!("{:03b}", i.cc))?;
            write_field(f, "AGEX", "DRID", i.drid.to_string())?;
        }
        writeln!(f)?;

        if let Some(i) = write_latch(f, "MEM", &self.latches.memory)? {
            write_field(f, "MEM", "CS", format!("{:?}", self.latches.memory.cs))?;
            write_field(f, "MEM", "ALU_RESULT", hex(i.alu_result))?;
            write_field(f, "MEM", "ADDRESS", hex(i.address))?;
            write_field(f, "MEM", "CC", format!("{:03b}", i.cc))?;
            write_field(f, "MEM", "DRID", i.drid.to_string())?;
        }
        writeln!(f)?;

        if let Some(i) = write_latch(f, "SR", &self.latches.store)? {
            write_field(f, "SR", "CS", format!("{:?}", self.latches.store.cs))?;
            write_field(f, "SR", "DATA", hex(i.data))?;
            write_field(f, "SR", "ALU_RESULT", hex(i.alu_result))?;
            write_field(f, "SR", "ADDRESS", hex(i.address))?;
            write_field(f, "SR", "DRID", i.drid.to_string())?;
        }
        writeln!(f)?;

        let s = &self.stall;
        writeln!(f, "icache_r        : {}", u8::from(s.icache_ready))?;
        writeln!(f, "dep_stall       : {}", u8::from(s.dep_stall))?;
        writeln!(f, "v_de_br_stall   : {}", u8::from(s.v_de_br_stall))?;
        writeln!(f, "v_agex_br_stall : {}", u8::from(s.v_agex_br_stall))?;
        writeln!(f, "v_mem_br_stall  : {}", u8::from(s.v_mem_br_stall))?;
        writeln!(f, "mem_stall       : {}", u8::from(s.mem_stall))?;
        writeln!(f, "mem_pc_mux      : {}", self.pc_mux.bits())
    }
}

/// All control-store rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlStoreDump {
    /// Rows in address order.
    pub rows: Vec<ControlWord>,
}

impl fmt::Display for ControlStoreDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nControl store content")?;
        writeln!(f, "------------------------")?;
        for (row, word) in self.rows.iter().enumerate() {
            writeln!(f, "Row {row:2} : {word}")?;
        }
        Ok(())
    }
}

const PC_COL: usize = 8;
const INST_COL: usize = 30;
const MEM_COL: usize = 10;
const CYCLE_COL: usize = 5;

/// Pipeline timing diagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingDiagram {
    /// First cycle shown.
    pub first_cycle: u64,
    /// Cycles completed when the diagram was taken.
    pub cycles: u64,
    /// Traced instructions in fetch order.
    pub rows: Vec<InstructionTrace>,
}

impl TimingDiagram {
    /// Builds a diagram covering every cycle since the oldest row was fetched.
    pub fn new(rows: Vec<InstructionTrace>, cycles: u64) -> Self {
        let first_cycle = rows
            .iter()
            .map(|trace| trace.fetch_cycle)
            .min()
            .unwrap_or(cycles);
        Self {
            first_cycle,
            cycles,
            rows,
        }
    }

    fn columns(&self) -> impl Iterator<Item = u64> {
        self.first_cycle..self.cycles
    }
}

impl fmt::Display for TimingDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n{:<PC_COL$}| {:<INST_COL$}| {:<MEM_COL$}",
            "PC", "Instruction", "Mem Addr"
        )?;
        for cycle in self.columns() {
            write!(f, "| {:<CYCLE_COL$}", format!("C{cycle}"))?;
        }
        writeln!(f, "|")?;

        write!(
            f,
            "{}+{}+{}",
            "-".repeat(PC_COL),
            "-".repeat(INST_COL + 1),
            "-".repeat(MEM_COL + 1)
        )?;
        for _ in self.columns() {
            write!(f, "+{}", "-".repeat(CYCLE_COL + 1))?;
        }
        writeln!(f, "|")?;

        for trace in &self.rows {
            let mem = trace
                .mem_addr
                .map(|addr| format!("0x{addr:04x}"))
                .unwrap_or_default();
            write!(
                f,
                "{:<PC_COL$}| {:<INST_COL$}| {:<MEM_COL$}",
                format!("0x{:04x}", trace.pc),
                trace.disassembly,
                mem
            )?;
            let mut marks = trace.marks.iter().peekable();
            for cycle in self.columns() {
                while marks.next_if(|mark| mark.cycle < cycle).is_some() {}
                let cell = marks
                    .next_if(|mark| mark.cycle == cycle)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                write!(f, "| {cell:<CYCLE_COL$}")?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
