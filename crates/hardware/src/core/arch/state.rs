//! Program counter, condition codes, and register file.

use crate::common::bits::{Bits3, Word};
use crate::common::error::Result;
use crate::common::reg::RegisterFile;
use crate::core::arch::stage_signals::StageSignals;

/// Architectural and inter-stage state of the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchState {
    /// Program counter (byte address).
    pub pc: Word,
    /// Negative flag.
    pub n: bool,
    /// Zero flag.
    pub z: bool,
    /// Positive flag.
    pub p: bool,
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// This cycle's stage signals.
    pub signals: StageSignals,
}

impl Default for ArchState {
    /// PC = 0 with Z set, as at power-on.
    fn default() -> Self {
        Self {
            pc: Word::ZERO,
            n: false,
            z: true,
            p: false,
            regs: RegisterFile::new(),
            signals: StageSignals::default(),
        }
    }
}

impl ArchState {
    /// Creates the power-on state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Condition codes packed as `n z p`, `n` in bit 2.
    pub const fn cc(&self) -> Bits3 {
        Bits3::new(((self.n as u64) << 2) | ((self.z as u64) << 1) | self.p as u64)
    }

    /// Reads the live condition codes, then commits the Store stage's codes if it is
    /// retiring a condition-code write this cycle.
    ///
    /// The returned value is always the pre-update triple, so a write committed in
    /// this cycle is first visible to the next cycle's read.
    pub const fn get_nzp(&mut self, will_load_new_ccs: bool) -> Bits3 {
        let current = self.cc();
        if will_load_new_ccs {
            self.n = self.signals.store.n;
            self.z = self.signals.store.z;
            self.p = self.signals.store.p;
        }
        current
    }

    /// Reads a register by index.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`](crate::common::SimError::InvalidRegister)
    /// for indices outside `0..8`.
    pub fn get_register(&self, idx: usize) -> Result<Word> {
        self.regs.get(idx)
    }

    /// Writes a register by index.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`](crate::common::SimError::InvalidRegister)
    /// for indices outside `0..8`.
    pub fn set_register(&mut self, idx: usize, value: Word) -> Result<()> {
        self.regs.set(idx, value)
    }
}
