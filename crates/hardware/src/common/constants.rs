//! Global Machine Constants.
//!
//! This module defines the fixed parameters of the LC-3b pipeline. It includes:
//! 1. **Memory Constants:** Memory size and the sentinel returned on a cache miss.
//! 2. **Register Constants:** Register file size and the link register.
//! 3. **Control Store Constants:** Row count and control-word width.

/// Number of 16-bit words in main memory.
pub const WORDS_IN_MEM: usize = 0x8000;

/// Word returned by either cache port while it is not ready.
pub const CACHE_MISS_WORD: u16 = 0xFEED;

/// Number of general-purpose registers.
pub const LC3B_REGS: usize = 8;

/// Register written with the return address by JSR, JSRR and TRAP.
pub const LINK_REGISTER: u64 = 7;

/// Number of rows in the control store.
pub const CONTROL_STORE_ROWS: usize = 64;

/// Width of one control-store word in bits.
pub const CONTROL_STORE_BITS: usize = 23;

/// Byte distance between sequential instructions.
pub const INSTRUCTION_BYTES: u64 = 2;

/// Cycle period of instruction-cache misses in the default latency model.
pub const ICACHE_MISS_PERIOD: u64 = 13;

/// Cycle period of data-cache misses in the default latency model.
pub const DCACHE_MISS_PERIOD: u64 = 9;
