//! Simulator: owns the CPU and the pipeline side by side.
//!
//! The stage functions borrow the [`Cpu`] and the pipeline latches separately, so
//! neither holds a reference to the other. The simulator adds the run bit, the
//! halt protocol, statistics, and the diagnostic dumps on top.
//!
//! Halting follows the machine's convention: the program is finished once the PC
//! reaches 0 (the HALT trap jumps there), and exactly one further cycle is clocked
//! so the instructions behind the trap can drain one stage.

use std::path::Path;

use crate::common::constants::WORDS_IN_MEM;
use crate::common::error::{Result, SimError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::microcode::ControlStore;
use crate::core::pipeline::Pipeline;
use crate::sim::dump::{ControlStoreDump, LatchDump, MemoryDump, RegisterDump, TimingDiagram};
use crate::sim::loader::{self, ProgramImage};
use crate::stats::SimStats;

/// Top-level simulator: CPU state, pipeline latches, and statistics.
#[derive(Debug)]
pub struct Simulator {
    /// PC, registers, memory, control store, and the cycle counter.
    pub cpu: Cpu,
    /// Latches and instruction history.
    pub pipeline: Pipeline,
    /// Performance counters.
    pub stats: SimStats,
    max_cycles: Option<u64>,
    running: bool,
}

impl Simulator {
    /// Creates a running simulator with empty memory.
    pub fn new(control_store: ControlStore, config: &Config) -> Self {
        Self {
            cpu: Cpu::new(control_store, config),
            pipeline: Pipeline::new(config.general.history_limit),
            stats: SimStats::default(),
            max_cycles: config.general.max_cycles,
            running: true,
        }
    }

    /// Loads the control store and every program, then returns a running simulator.
    ///
    /// Programs are loaded in order; the first one sets the start PC.
    ///
    /// # Errors
    ///
    /// Any error from reading or parsing the microcode or a program file.
    pub fn initialize(
        config: &Config,
        ucode_path: impl AsRef<Path>,
        program_paths: &[impl AsRef<Path>],
    ) -> Result<Self> {
        let control_store = loader::load_control_store(ucode_path, &config.microcode)?;
        let mut sim = Self::new(control_store, config);
        for path in program_paths {
            let _ = sim.load_program(path)?;
        }
        Ok(sim)
    }

    /// Reads a program file into memory.
    ///
    /// # Errors
    ///
    /// Any error from [`loader::load_program`].
    pub fn load_program(&mut self, path: impl AsRef<Path>) -> Result<ProgramImage> {
        loader::load_program(&mut self.cpu, path)
    }

    /// Writes a parsed program into memory.
    ///
    /// # Errors
    ///
    /// Any error from [`loader::install_program`].
    pub fn install_program(&mut self, image: &ProgramImage) -> Result<()> {
        loader::install_program(&mut self.cpu, image)
    }

    /// Whether the run bit is set.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Cycles completed.
    pub const fn cycle_count(&self) -> u64 {
        self.cpu.cycles
    }

    /// Returns the machine to its power-on state, keeping memory and microcode.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.pipeline.reset();
        self.stats = SimStats::default();
        self.running = true;
    }

    /// Clocks one cycle unconditionally.
    pub fn cycle(&mut self) {
        if let Some(instr) = self.pipeline.latches().store.live() {
            self.stats.record_retire(instr.ir);
        }
        self.pipeline.cycle(&mut self.cpu);
        let signals = &self.cpu.state.signals;
        self.stats.record_cycle(&signals.stall, signals.memory.pc_mux);
        self.cpu.cycles += 1;
    }

    /// Simulates up to `cycles` cycles, halting early once the PC reaches 0.
    ///
    /// Returns the number of cycles actually clocked.
    pub fn run(&mut self, cycles: u64) -> u64 {
        if !self.running {
            tracing::warn!("can't simulate, simulator is halted");
            return 0;
        }
        tracing::debug!(cycles, "simulating");
        for done in 0..cycles {
            if self.cpu.state.pc.is_zero() {
                self.cycle();
                self.halt();
                return done + 1;
            }
            self.cycle();
        }
        cycles
    }

    /// Simulates one cycle; equivalent to `run(1)`.
    pub fn step(&mut self) -> u64 {
        self.run(1)
    }

    /// Simulates until the program halts.
    ///
    /// Stops after the configured `max_cycles` budget, if any, leaving the simulator
    /// running. Returns the number of cycles clocked.
    pub fn run_to_halt(&mut self) -> u64 {
        if !self.running || self.cpu.state.pc.is_zero() {
            tracing::warn!("can't simulate, simulator is halted");
            return 0;
        }
        tracing::debug!("simulating to completion");
        let mut done = 0;
        while !self.cpu.state.pc.is_zero() {
            if self.max_cycles.is_some_and(|limit| done >= limit) {
                tracing::warn!(cycles = done, "cycle budget exhausted before halt");
                return done;
            }
            self.cycle();
            done += 1;
        }
        self.cycle();
        self.halt();
        done + 1
    }

    fn halt(&mut self) {
        self.running = false;
        tracing::debug!(cycles = self.cpu.cycles, "simulator halted");
    }

    /// Architectural state snapshot.
    pub fn dump_registers(&self) -> RegisterDump {
        RegisterDump {
            cycles: self.cpu.cycles,
            pc: self.cpu.state.pc,
            cc: self.cpu.state.cc(),
            regs: self.cpu.state.regs,
        }
    }

    /// Memory snapshot of the inclusive byte range `start..=stop`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemoryAddress`] if `stop` lies past the end of memory.
    pub fn dump_memory_range(&self, start: u16, stop: u16) -> Result<MemoryDump> {
        let (lo, hi) = (usize::from(start >> 1), usize::from(stop >> 1));
        if hi >= WORDS_IN_MEM {
            return Err(SimError::InvalidMemoryAddress(hi));
        }
        let mut words = Vec::with_capacity(hi.saturating_sub(lo) + 1);
        for addr in lo..=hi {
            words.push(((addr << 1) as u16, self.cpu.memory.read_word(addr)?));
        }
        Ok(MemoryDump { start, stop, words })
    }

    /// Latch snapshot.
    pub fn dump_pipeline_latches(&self) -> LatchDump {
        LatchDump {
            cycles: self.cpu.cycles,
            pc: self.cpu.state.pc,
            latches: *self.pipeline.latches(),
            stall: self.cpu.state.signals.stall,
            pc_mux: self.cpu.state.signals.memory.pc_mux,
        }
    }

    /// Control-store snapshot.
    pub fn dump_control_store(&self) -> ControlStoreDump {
        ControlStoreDump {
            rows: self.cpu.control_store.rows().collect(),
        }
    }

    /// Timing diagram of every traced instruction.
    ///
    /// Retired instructions are dropped from the history once shown; in-flight ones
    /// appear again in the next diagram.
    pub fn timing_diagram(&mut self) -> TimingDiagram {
        let rows = self.pipeline.history.iter().cloned().collect();
        self.pipeline.history.evict_retired();
        TimingDiagram::new(rows, self.cpu.cycles)
    }
}
