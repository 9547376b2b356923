//! # Whole-Program Tests
//!
//! Small programs run through every stage. Cycle counts are exact: the pipeline does
//! no forwarding or prediction, so each hazard costs a fixed, known number of cycles.

use lc3b_pipe_core::core::pipeline::history::StageMark;
use lc3b_pipe_core::core::pipeline::signals::PcMux;
use lc3b_pipe_core::soc::AlwaysReady;

use crate::common::builder::instruction::*;
use crate::common::harness::{ORIGIN, TestContext};
use crate::common::mocks::latency::{MockLatency, missing_first};

// ══════════════════════════════════════════════════════════
// 1. Straight-line code and halting
// ══════════════════════════════════════════════════════════

#[test]
fn add_then_halt() {
    let mut ctx = TestContext::new().load_program(ORIGIN, &[add_imm(1, 1, 5), halt()]);
    let cycles = ctx.run_to_halt(100);

    // ADD retires in cycle 4, the trap redirects to x0000 the same cycle,
    // and one drain cycle follows.
    assert_eq!(cycles, 6);
    assert_eq!(ctx.get_reg(1), 5);
    assert_eq!(ctx.get_reg(7), ORIGIN + 4, "trap links the address after itself");
    assert!(!ctx.sim.is_running());
    assert_eq!(ctx.sim.stats.instructions_retired, 2);
}

#[test]
fn halting_trap_sets_condition_codes_from_nothing() {
    let mut ctx = TestContext::new().load_program(ORIGIN, &[add_imm(1, 1, -1), halt()]);
    let _ = ctx.run_to_halt(100);
    assert_eq!(ctx.get_reg(1), 0xFFFF);
    let cc = ctx.cpu().state.cc();
    assert_eq!(cc.value(), 0b100, "ADD of -1 leaves N set; TRAP does not load CCs");
}

#[test]
fn register_dependency_stalls_until_writer_retires() {
    let mut ctx = TestContext::new().load_program(
        ORIGIN,
        &[add_imm(1, 1, 1), add_imm(2, 1, 1), halt()],
    );
    let cycles = ctx.run_to_halt(100);

    assert_eq!(ctx.get_reg(2), 2, "reader saw the retired value");
    assert_eq!(cycles, 10);
    assert_eq!(ctx.sim.stats.stalls_data, 3, "writer in AGEX, Memory, then Store");

    let reader = ctx
        .sim
        .pipeline
        .history
        .iter()
        .find(|t| t.pc.value() == u64::from(ORIGIN + 2))
        .unwrap();
    let cells: Vec<String> = reader.marks.iter().map(ToString::to_string).collect();
    assert_eq!(cells, ["F", "D*", "D*", "D*", "D", "E", "M", "S"]);
    assert_eq!(reader.fetch_cycle, 1);
}

#[test]
fn independent_instructions_do_not_stall() {
    let mut ctx = TestContext::new().load_program(
        ORIGIN,
        &[add_imm(1, 1, 1), add_imm(2, 2, 2), add_imm(3, 3, 3), halt()],
    );
    let cycles = ctx.run_to_halt(100);
    assert_eq!(ctx.sim.stats.stalls_data, 0);
    assert_eq!((ctx.get_reg(1), ctx.get_reg(2), ctx.get_reg(3)), (1, 2, 3));
    assert_eq!(cycles, 8);
}

// ══════════════════════════════════════════════════════════
// 2. Control flow
// ══════════════════════════════════════════════════════════

#[test]
fn taken_branch_skips_the_shadow() {
    let mut ctx = TestContext::new().load_program(
        ORIGIN,
        &[
            and_imm(0, 0, 0),
            br(false, true, false, 1),
            add_imm(1, 1, 7),
            halt(),
        ],
    );

    let redirect = ctx.step_until(100, |sim| {
        sim.cpu.state.signals.memory.pc_mux == PcMux::BranchTarget
    });
    // AND retires at cycle 4, BR decodes at 5 and resolves in Memory at 7.
    assert_eq!(redirect, 8);
    assert_eq!(ctx.pc(), ORIGIN + 6);

    let _ = ctx.run_to_halt(100);
    assert_eq!(ctx.get_reg(1), 0, "the skipped ADD never retires");
    assert_eq!(ctx.sim.stats.inst_alu, 1);
    assert_eq!(ctx.sim.stats.inst_control, 1);
    assert_eq!(ctx.sim.stats.instructions_retired, 3);
    assert_eq!(ctx.sim.stats.redirects, 2);
}

#[test]
fn untaken_branch_falls_through() {
    let mut ctx = TestContext::new().load_program(
        ORIGIN,
        &[
            add_imm(0, 0, 1),
            br(true, true, false, 1),
            add_imm(1, 1, 7),
            halt(),
        ],
    );
    let _ = ctx.run_to_halt(100);
    assert_eq!(ctx.get_reg(1), 7);
    assert_eq!(ctx.sim.stats.redirects, 1, "only the trap redirects");
}

#[test]
fn subroutine_call_and_return() {
    let mut ctx = TestContext::new().load_program(
        ORIGIN,
        &[jsr(2), halt(), 0x0000, add_imm(1, 1, 3), ret()],
    );
    let _ = ctx.run_to_halt(200);
    assert_eq!(ctx.get_reg(1), 3);
    assert_eq!(ctx.get_reg(7), ORIGIN + 4, "the halt trap overwrote the return link");
}

#[test]
fn backward_loop_counts_down() {
    // R0 = 3; loop: R1 += 2; R0 -= 1; BRp loop.
    let mut ctx = TestContext::new().load_program(
        ORIGIN,
        &[
            add_imm(0, 0, 3),
            add_imm(1, 1, 2),
            add_imm(0, 0, -1),
            br(false, false, true, -3),
            halt(),
        ],
    );
    let _ = ctx.run_to_halt(500);
    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.get_reg(1), 6);
    assert_eq!(ctx.sim.stats.inst_control, 3);
}

#[test]
fn lea_and_shifts() {
    let mut ctx = TestContext::new().load_program(
        ORIGIN,
        &[lea(2, 4), lshf(3, 2, 2), rshfa(4, 3, 4), rshfl(5, 3, 4), halt()],
    );
    let _ = ctx.run_to_halt(200);
    assert_eq!(ctx.get_reg(2), ORIGIN + 2 + 8);
    assert_eq!(ctx.get_reg(3), 0xC028);
    assert_eq!(ctx.get_reg(4), 0xFC02, "arithmetic shift fills with the sign");
    assert_eq!(ctx.get_reg(5), 0x0C02);
}

// ══════════════════════════════════════════════════════════
// 3. Memory
// ══════════════════════════════════════════════════════════

#[test]
fn byte_and_word_stores_and_loads() {
    let mut ctx = TestContext::new().load_program(
        ORIGIN,
        &[
            add_imm(1, 1, -6),
            stb(1, 0, 5),
            stw(1, 0, 4),
            ldb(3, 0, 5),
            ldw(4, 0, 4),
            halt(),
        ],
    );
    let _ = ctx.run_to_halt(300);

    assert_eq!(ctx.word_at(4), 0xFA00, "STB to an odd address writes the high byte");
    assert_eq!(ctx.word_at(8), 0xFFFA);
    assert_eq!(ctx.get_reg(3), 0xFFFA, "LDB sign-extends");
    assert_eq!(ctx.get_reg(4), 0xFFFA);
    assert_eq!(ctx.sim.stats.inst_store, 2);
    assert_eq!(ctx.sim.stats.inst_load, 2);
}

#[test]
fn data_cache_miss_costs_one_cycle() {
    let build = |dcache: MockLatency| {
        TestContext::new()
            .load_program(ORIGIN, &[ldw(1, 0, 8), halt()])
            .with_word(0x0010, 0xBEEF)
            .with_latency(AlwaysReady, dcache)
    };

    let mut slow = build(missing_first(1));
    let slow_cycles = slow.run_to_halt(100);
    assert_eq!(slow.get_reg(1), 0xBEEF);
    assert_eq!(slow.sim.stats.stalls_mem, 1);

    let mut fast = build(missing_first(0));
    let fast_cycles = fast.run_to_halt(100);
    assert_eq!(fast.get_reg(1), 0xBEEF);
    assert_eq!(fast.sim.stats.stalls_mem, 0);
    assert_eq!(slow_cycles, fast_cycles + 1);
}

#[test]
fn instruction_cache_miss_delays_fetch() {
    let mut icache = MockLatency::new();
    let _ = icache
        .expect_is_ready()
        .times(7)
        .returning(|cycle| cycle != 0);

    let mut ctx = TestContext::new()
        .load_program(ORIGIN, &[add_imm(1, 1, 5), halt()])
        .with_latency(icache, AlwaysReady);
    let cycles = ctx.run_to_halt(100);

    assert_eq!(cycles, 7);
    assert_eq!(ctx.sim.stats.icache_misses, 1);
    assert_eq!(ctx.get_reg(1), 5);
}

#[test]
fn trap_vector_jumps_to_handler() {
    // TRAP x30 jumps through word x0030 to a handler that halts.
    let mut ctx = TestContext::new()
        .load_program(ORIGIN, &[trap(0x30), 0x0000])
        .load_program(0x4000, &[add_imm(5, 5, 9), halt()])
        .with_word(0x0060, 0x4000);
    let _ = ctx.run_to_halt(200);
    assert_eq!(ctx.get_reg(5), 9);
    assert_eq!(ctx.sim.stats.inst_trap, 2);
}

#[test]
fn default_latency_models_still_compute_correctly() {
    let mut ideal = TestContext::new().load_program(
        ORIGIN,
        &[add_imm(1, 1, 1), stw(1, 0, 0x10), ldw(2, 0, 0x10), add(3, 1, 2), halt()],
    );
    let ideal_cycles = ideal.run_to_halt(500);

    let mut real = TestContext::with_config(&lc3b_pipe_core::Config::default()).load_program(
        ORIGIN,
        &[add_imm(1, 1, 1), stw(1, 0, 0x10), ldw(2, 0, 0x10), add(3, 1, 2), halt()],
    );
    let real_cycles = real.run_to_halt(500);

    assert_eq!(real.get_reg(3), 2);
    assert_eq!(ideal.get_reg(3), 2);
    assert!(real_cycles > ideal_cycles);
    assert!(real.sim.stats.icache_misses > 0);
}

#[test]
fn retired_trace_reaches_every_stage() {
    let mut ctx = TestContext::new().load_program(ORIGIN, &[add_imm(1, 1, 5), halt()]);
    let _ = ctx.run_to_halt(100);
    let add = ctx.sim.pipeline.history.iter().next().unwrap();
    let stages: Vec<StageMark> = add.marks.iter().map(|m| m.stage).collect();
    assert_eq!(
        stages,
        [
            StageMark::Fetch,
            StageMark::Decode,
            StageMark::Agex,
            StageMark::Memory,
            StageMark::Store
        ]
    );
    assert!(add.retired);
}
