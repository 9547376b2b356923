use lc3b_pipe_core::config::MemoryConfig;
use lc3b_pipe_core::soc::{AlwaysReady, CycleModulo, LatencyModel, MainMemory};
use lc3b_pipe_core::common::bits::Word;

use crate::common::mocks::latency::MockLatency;

#[test]
fn cycle_modulo_misses_on_multiples() {
    let mut model = CycleModulo::new(13);
    let misses: Vec<u64> = (0..40).filter(|c| !model.is_ready(*c)).collect();
    assert_eq!(misses, vec![0, 13, 26, 39]);
}

#[test]
fn zero_period_never_misses() {
    let mut model = CycleModulo::new(0);
    assert!((0..100).all(|c| model.is_ready(c)));
    assert!(AlwaysReady.is_ready(0));
}

#[test]
fn closures_are_latency_models() {
    let mut odd_only = |cycle: u64| cycle % 2 == 1;
    assert!(!odd_only.is_ready(0));
    assert!(odd_only.is_ready(1));
}

#[test]
fn memory_consults_port_model_with_cycle_count() {
    let mut icache = MockLatency::new();
    let _ = icache
        .expect_is_ready()
        .withf(|cycle| *cycle == 7)
        .times(1)
        .return_const(true);
    let mut dcache = MockLatency::new();
    let _ = dcache.expect_is_ready().never();

    let mut mem = MainMemory::with_latency(icache, dcache);
    assert!(mem.icache_access(Word::ZERO, 7).ready);
}

#[test]
fn config_periods_drive_the_default_models() {
    let mut mem = MainMemory::new(&MemoryConfig {
        icache_miss_period: 3,
        dcache_miss_period: 0,
    });
    assert!(!mem.icache_access(Word::ZERO, 3).ready);
    assert!(mem.icache_access(Word::ZERO, 4).ready);
}
