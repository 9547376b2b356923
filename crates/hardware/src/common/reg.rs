//! General-Purpose Register File.
//!
//! Eight 16-bit registers, R0 through R7. There is no hardwired zero
//! register; R7 doubles as the link register for subroutine calls and traps.

use std::fmt;

use crate::common::bits::{Bits3, Word};
use crate::common::constants::LC3B_REGS;
use crate::common::error::{Result, SimError};

/// The architectural register file.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [Word; LC3B_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the register named by a 3-bit id. Always in range.
    #[inline]
    pub const fn read(&self, id: Bits3) -> Word {
        self.regs[id.as_usize()]
    }

    /// Writes the register named by a 3-bit id. Always in range.
    #[inline]
    pub const fn write(&mut self, id: Bits3, value: Word) {
        self.regs[id.as_usize()] = value;
    }

    /// Reads a register by numeric index.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] for indices outside `0..8`.
    pub fn get(&self, idx: usize) -> Result<Word> {
        self.regs
            .get(idx)
            .copied()
            .ok_or(SimError::InvalidRegister(idx))
    }

    /// Writes a register by numeric index.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] for indices outside `0..8`.
    pub fn set(&mut self, idx: usize, value: Word) -> Result<()> {
        let slot = self
            .regs
            .get_mut(idx)
            .ok_or(SimError::InvalidRegister(idx))?;
        *slot = value;
        Ok(())
    }

    /// Iterates the registers in index order.
    pub fn iter(&self) -> impl Iterator<Item = Word> + '_ {
        self.regs.iter().copied()
    }
}

impl fmt::Debug for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_map();
        for (i, value) in self.regs.iter().enumerate() {
            let _ = list.entry(&format_args!("R{i}"), &format_args!("{:#06x}", value.value()));
        }
        list.finish()
    }
}
