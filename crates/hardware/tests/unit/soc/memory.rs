//! # Main Memory Tests
//!
//! Byte planes, word assembly, and the data-port write enables.

use lc3b_pipe_core::common::bits::Word;
use lc3b_pipe_core::common::constants::{CACHE_MISS_WORD, WORDS_IN_MEM};
use lc3b_pipe_core::common::error::SimError;
use lc3b_pipe_core::soc::memory::WriteEnable;
use lc3b_pipe_core::soc::{AlwaysReady, MainMemory};

use crate::common::mocks::latency::missing_on;

fn memory() -> MainMemory {
    MainMemory::with_latency(AlwaysReady, AlwaysReady)
}

// ══════════════════════════════════════════════════════════
// 1. Byte planes
// ══════════════════════════════════════════════════════════

#[test]
fn words_are_high_byte_then_low_byte() {
    let mut mem = memory();
    mem.set_low_byte(10, 0x34).unwrap();
    mem.set_high_byte(10, 0x12).unwrap();
    assert_eq!(mem.read_word(10).unwrap().value(), 0x1234);
}

#[test]
fn write_word_splits_into_planes() {
    let mut mem = memory();
    mem.write_word(0x1800, Word::new(0xBEEF)).unwrap();
    assert_eq!(mem.get_low_byte(0x1800).unwrap(), 0xEF);
    assert_eq!(mem.get_high_byte(0x1800).unwrap(), 0xBE);
}

#[test]
fn accesses_past_the_end_fail() {
    let mut mem = memory();
    assert!(matches!(
        mem.read_word(WORDS_IN_MEM),
        Err(SimError::InvalidMemoryAddress(a)) if a == WORDS_IN_MEM
    ));
    assert!(mem.set_high_byte(WORDS_IN_MEM, 0).is_err());
    assert!(mem.read_word(WORDS_IN_MEM - 1).is_ok());
}

#[test]
fn clear_zeroes_everything() {
    let mut mem = memory();
    mem.write_word(5, Word::new(0xFFFF)).unwrap();
    mem.clear();
    assert!(mem.read_word(5).unwrap().is_zero());
}

// ══════════════════════════════════════════════════════════
// 2. Cache ports
// ══════════════════════════════════════════════════════════

#[test]
fn icache_ignores_address_bit_zero() {
    let mut mem = memory();
    mem.write_word(0x1800, Word::new(0x1265)).unwrap();
    let even = mem.icache_access(Word::new(0x3000), 0);
    let odd = mem.icache_access(Word::new(0x3001), 1);
    assert!(even.ready && odd.ready);
    assert_eq!(even.word.value(), 0x1265);
    assert_eq!(odd.word.value(), 0x1265);
}

#[test]
fn dcache_returns_old_word_then_writes() {
    let mut mem = memory();
    mem.write_word(4, Word::new(0x1111)).unwrap();
    let response = mem.dcache_access(Word::new(8), Word::new(0x2222), WriteEnable::WORD, 0);
    assert_eq!(response.word.value(), 0x1111);
    assert_eq!(mem.read_word(4).unwrap().value(), 0x2222);
}

#[test]
fn dcache_byte_enables_touch_one_plane() {
    let mut mem = memory();
    mem.write_word(2, Word::new(0xAAAA)).unwrap();

    let high = WriteEnable {
        low: false,
        high: true,
    };
    let _ = mem.dcache_access(Word::new(5), Word::new(0x5500), high, 0);
    assert_eq!(mem.read_word(2).unwrap().value(), 0x55AA);

    let low = WriteEnable {
        low: true,
        high: false,
    };
    let _ = mem.dcache_access(Word::new(4), Word::new(0x0033), low, 1);
    assert_eq!(mem.read_word(2).unwrap().value(), 0x5533);
}

#[test]
fn read_only_access_leaves_memory_alone() {
    let mut mem = memory();
    mem.write_word(2, Word::new(0xAAAA)).unwrap();
    let response = mem.dcache_access(Word::new(4), Word::new(0xFFFF), WriteEnable::NONE, 0);
    assert_eq!(response.word.value(), 0xAAAA);
    assert_eq!(mem.read_word(2).unwrap().value(), 0xAAAA);
}

#[test]
fn miss_returns_sentinel_and_skips_write() {
    let mut mem = MainMemory::with_latency(missing_on(&[0]), missing_on(&[0]));
    mem.write_word(2, Word::new(0xAAAA)).unwrap();

    let fetch = mem.icache_access(Word::new(4), 0);
    assert!(!fetch.ready);
    assert_eq!(fetch.word.value(), u64::from(CACHE_MISS_WORD));

    let store = mem.dcache_access(Word::new(4), Word::new(0x1234), WriteEnable::WORD, 0);
    assert!(!store.ready);
    assert_eq!(store.word.value(), u64::from(CACHE_MISS_WORD));
    assert_eq!(mem.read_word(2).unwrap().value(), 0xAAAA, "missed write must not land");

    let retry = mem.dcache_access(Word::new(4), Word::new(0x1234), WriteEnable::WORD, 1);
    assert!(retry.ready);
    assert_eq!(mem.read_word(2).unwrap().value(), 0x1234);
}
