//! Main Memory.
//!
//! This module implements the two-bank LC-3b main memory. It provides:
//! 1. **Byte planes:** `WORDS_IN_MEM` words split into independently writable low and high bytes.
//! 2. **Instruction port:** Word reads for Fetch, gated by the instruction latency model.
//! 3. **Data port:** Word reads with byte-enabled writes for the Memory stage, gated by the
//!    data latency model.
//!
//! While a port is not ready it returns the sentinel word [`CACHE_MISS_WORD`] and performs no write.

/// Cache-port latency models.
pub mod controller;

use std::fmt;

use self::controller::{BoxedLatency, CycleModulo, LatencyModel};
use crate::common::bits::Word;
use crate::common::constants::{CACHE_MISS_WORD, WORDS_IN_MEM};
use crate::common::error::{Result, SimError};
use crate::config::MemoryConfig;

/// Result of one cache-port access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheResponse {
    /// Word read, or [`CACHE_MISS_WORD`] when not ready.
    pub word: Word,
    /// Whether the access completed this cycle.
    pub ready: bool,
}

impl CacheResponse {
    const fn miss() -> Self {
        Self {
            word: Word::new(CACHE_MISS_WORD as u64),
            ready: false,
        }
    }
}

/// Byte-enable mask for a data-cache write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteEnable {
    /// Write bits 7:0.
    pub low: bool,
    /// Write bits 15:8.
    pub high: bool,
}

impl WriteEnable {
    /// No bytes written.
    pub const NONE: Self = Self {
        low: false,
        high: false,
    };

    /// Both bytes written.
    pub const WORD: Self = Self {
        low: true,
        high: true,
    };
}

/// Word-addressed memory with separate low and high byte planes.
pub struct MainMemory {
    low: Vec<u8>,
    high: Vec<u8>,
    icache: BoxedLatency,
    dcache: BoxedLatency,
}

impl MainMemory {
    /// Creates a zeroed memory with the latency models described by `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Miss periods for the instruction and data ports.
    pub fn new(config: &MemoryConfig) -> Self {
        Self::with_latency(
            CycleModulo::new(config.icache_miss_period),
            CycleModulo::new(config.dcache_miss_period),
        )
    }

    /// Creates a zeroed memory with explicit latency models.
    pub fn with_latency(
        icache: impl LatencyModel + 'static,
        dcache: impl LatencyModel + 'static,
    ) -> Self {
        Self {
            low: vec![0; WORDS_IN_MEM],
            high: vec![0; WORDS_IN_MEM],
            icache: BoxedLatency(Box::new(icache)),
            dcache: BoxedLatency(Box::new(dcache)),
        }
    }

    /// Replaces the instruction-port latency model.
    pub fn set_icache_latency(&mut self, model: impl LatencyModel + 'static) {
        self.icache = BoxedLatency(Box::new(model));
    }

    /// Replaces the data-port latency model.
    pub fn set_dcache_latency(&mut self, model: impl LatencyModel + 'static) {
        self.dcache = BoxedLatency(Box::new(model));
    }

    /// Zeroes both byte planes. Latency models are kept.
    pub fn clear(&mut self) {
        self.low.fill(0);
        self.high.fill(0);
    }

    fn check(word_addr: usize) -> Result<usize> {
        if word_addr < WORDS_IN_MEM {
            Ok(word_addr)
        } else {
            Err(SimError::InvalidMemoryAddress(word_addr))
        }
    }

    /// Reads the low byte of a word.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemoryAddress`] past the end of memory.
    pub fn get_low_byte(&self, word_addr: usize) -> Result<u8> {
        Ok(self.low[Self::check(word_addr)?])
    }

    /// Reads the high byte of a word.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemoryAddress`] past the end of memory.
    pub fn get_high_byte(&self, word_addr: usize) -> Result<u8> {
        Ok(self.high[Self::check(word_addr)?])
    }

    /// Writes the low byte of a word.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemoryAddress`] past the end of memory.
    pub fn set_low_byte(&mut self, word_addr: usize, value: u8) -> Result<()> {
        self.low[Self::check(word_addr)?] = value;
        Ok(())
    }

    /// Writes the high byte of a word.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemoryAddress`] past the end of memory.
    pub fn set_high_byte(&mut self, word_addr: usize, value: u8) -> Result<()> {
        self.high[Self::check(word_addr)?] = value;
        Ok(())
    }

    /// Reads a whole word as `(high << 8) | low`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemoryAddress`] past the end of memory.
    pub fn read_word(&self, word_addr: usize) -> Result<Word> {
        let idx = Self::check(word_addr)?;
        Ok(self.word_at(idx))
    }

    /// Writes a whole word into both byte planes.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemoryAddress`] past the end of memory.
    pub fn write_word(&mut self, word_addr: usize, value: Word) -> Result<()> {
        let idx = Self::check(word_addr)?;
        self.low[idx] = value.range::<7, 0, 8>().value() as u8;
        self.high[idx] = value.range::<15, 8, 8>().value() as u8;
        Ok(())
    }

    /// Word index of a 16-bit byte address. Always inside memory.
    #[inline]
    const fn index_of(byte_addr: Word) -> usize {
        (byte_addr.value() >> 1) as usize
    }

    fn word_at(&self, idx: usize) -> Word {
        Word::new((u64::from(self.high[idx]) << 8) | u64::from(self.low[idx]))
    }

    /// Instruction-cache port.
    ///
    /// # Arguments
    ///
    /// * `byte_addr` - Fetch address; bit 0 is ignored.
    /// * `cycle` - Current cycle count, handed to the latency model.
    pub fn icache_access(&mut self, byte_addr: Word, cycle: u64) -> CacheResponse {
        if !self.icache.0.is_ready(cycle) {
            return CacheResponse::miss();
        }
        CacheResponse {
            word: self.word_at(Self::index_of(byte_addr)),
            ready: true,
        }
    }

    /// Data-cache port.
    ///
    /// When ready, returns the word as it was before this access and then writes the
    /// enabled bytes of `write_data`.
    ///
    /// # Arguments
    ///
    /// * `byte_addr` - Access address; bit 0 is ignored.
    /// * `write_data` - Outgoing data, already positioned within the word.
    /// * `enable` - Which byte planes to write.
    /// * `cycle` - Current cycle count, handed to the latency model.
    pub fn dcache_access(
        &mut self,
        byte_addr: Word,
        write_data: Word,
        enable: WriteEnable,
        cycle: u64,
    ) -> CacheResponse {
        if !self.dcache.0.is_ready(cycle) {
            return CacheResponse::miss();
        }
        let idx = Self::index_of(byte_addr);
        let word = self.word_at(idx);
        if enable.low {
            self.low[idx] = write_data.range::<7, 0, 8>().value() as u8;
        }
        if enable.high {
            self.high[idx] = write_data.range::<15, 8, 8>().value() as u8;
        }
        CacheResponse { word, ready: true }
    }
}

impl Default for MainMemory {
    fn default() -> Self {
        Self::new(&MemoryConfig::default())
    }
}

impl fmt::Debug for MainMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainMemory")
            .field("words", &self.low.len())
            .field("icache", &self.icache)
            .field("dcache", &self.dcache)
            .finish()
    }
}
