//! # Simulator Tests
//!
//! Initialization from files, `run`/`step`/`run_to_halt`, and reset.

use std::io::Write;

use lc3b_pipe_core::Simulator;
use lc3b_pipe_core::config::{Config, GeneralConfig, MemoryConfig};
use tempfile::NamedTempFile;

use crate::common::builder::instruction::{add_imm, halt};
use crate::common::harness::{ORIGIN, TestContext, UCODE};

fn add_then_halt() -> TestContext {
    TestContext::new().load_program(ORIGIN, &[add_imm(1, 1, 5), halt()])
}

fn ideal_config() -> Config {
    Config {
        memory: MemoryConfig {
            icache_miss_period: 0,
            dcache_miss_period: 0,
        },
        ..Config::default()
    }
}

#[test]
fn initialize_reads_microcode_and_programs() {
    let mut ucode = NamedTempFile::new().unwrap();
    ucode.write_all(UCODE.as_bytes()).unwrap();
    ucode.flush().unwrap();
    let mut prog = NamedTempFile::new().unwrap();
    writeln!(prog, "0x3000 0x1265 0xF025").unwrap();
    prog.flush().unwrap();

    let mut sim = Simulator::initialize(&ideal_config(), ucode.path(), &[prog.path()]).unwrap();
    assert!(sim.is_running());
    assert_eq!(sim.cpu.state.pc.value(), 0x3000);

    assert_eq!(sim.run_to_halt(), 6);
    assert_eq!(sim.cpu.state.get_register(1).unwrap().value(), 5);
}

#[test]
fn initialize_fails_on_a_missing_program() {
    let mut ucode = NamedTempFile::new().unwrap();
    ucode.write_all(UCODE.as_bytes()).unwrap();
    ucode.flush().unwrap();

    let result = Simulator::initialize(&Config::default(), ucode.path(), &["/nonexistent/p.hex"]);
    assert!(result.is_err());
}

#[test]
fn run_clocks_the_requested_cycles() {
    let mut ctx = add_then_halt();
    assert_eq!(ctx.sim.run(3), 3);
    assert!(ctx.sim.is_running());
    assert_eq!(ctx.sim.cycle_count(), 3);
    assert_eq!(ctx.sim.stats.cycles, 3);
}

#[test]
fn run_stops_one_cycle_after_the_pc_reaches_zero() {
    let mut ctx = add_then_halt();
    let _ = ctx.sim.run(3);
    assert_eq!(ctx.sim.run(100), 3);
    assert!(!ctx.sim.is_running());
    assert_eq!(ctx.sim.cycle_count(), 6);
}

#[test]
fn halted_simulator_refuses_to_run() {
    let mut ctx = add_then_halt();
    assert_eq!(ctx.sim.run_to_halt(), 6);
    assert_eq!(ctx.sim.run(10), 0);
    assert_eq!(ctx.sim.step(), 0);
    assert_eq!(ctx.sim.run_to_halt(), 0);
    assert_eq!(ctx.sim.cycle_count(), 6);
}

#[test]
fn step_is_a_single_cycle() {
    let mut ctx = add_then_halt();
    assert_eq!(ctx.sim.step(), 1);
    assert_eq!(ctx.sim.cycle_count(), 1);
    assert_eq!(ctx.pc(), ORIGIN + 2);
}

#[test]
fn run_to_halt_respects_the_cycle_budget() {
    let config = Config {
        general: GeneralConfig {
            max_cycles: Some(2),
            ..GeneralConfig::default()
        },
        ..ideal_config()
    };
    let mut ctx = TestContext::with_config(&config).load_program(ORIGIN, &[add_imm(1, 1, 5), halt()]);

    assert_eq!(ctx.sim.run_to_halt(), 2);
    assert!(ctx.sim.is_running());
    assert_eq!(ctx.get_reg(1), 0);
}

#[test]
fn run_to_halt_with_the_pc_at_zero_does_nothing() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.sim.run_to_halt(), 0);
    assert_eq!(ctx.sim.cycle_count(), 0);
}

#[test]
fn reset_keeps_memory_and_clears_the_rest() {
    let mut ctx = add_then_halt();
    let _ = ctx.sim.run_to_halt();
    ctx.sim.reset();

    assert!(ctx.sim.is_running());
    assert_eq!(ctx.sim.cycle_count(), 0);
    assert_eq!(ctx.sim.stats.instructions_retired, 0);
    assert_eq!(ctx.pc(), 0);
    assert_eq!(ctx.get_reg(1), 0);
    assert!(ctx.sim.pipeline.history.is_empty());
    assert_eq!(ctx.word_at(ORIGIN), add_imm(1, 1, 5));
}
