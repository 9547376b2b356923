//! Instruction field extraction.
//!
//! LC-3b instructions are one 16-bit word. The fields below overlap: which ones are
//! meaningful depends on the opcode, and the control store decides which the
//! datapath actually consumes.

use crate::common::bits::{Bits, Bits3, Bits6, Word};

/// Trait for extracting instruction fields from an instruction word.
pub trait InstructionBits {
    /// Major opcode (bits 15-12).
    fn opcode(&self) -> u8;

    /// Destination register, or the source register of a store (bits 11-9).
    fn dr(&self) -> Bits3;

    /// First source or base register (bits 8-6).
    fn sr1(&self) -> Bits3;

    /// Second source register of a register-mode operate (bits 2-0).
    fn sr2(&self) -> Bits3;

    /// Branch condition mask (bits 11-9), `n` being the most significant bit.
    fn nzp(&self) -> Bits3;

    /// Register/immediate selector of operate instructions (bit 5).
    fn imm_mode(&self) -> bool;

    /// Sign-extended 5-bit immediate.
    fn imm5(&self) -> i16;

    /// Sign-extended 6-bit offset (`LDB`/`STB`/`LDW`/`STW`).
    fn offset6(&self) -> i16;

    /// Sign-extended 9-bit PC offset (`BR`, `LEA`).
    fn pc_offset9(&self) -> i16;

    /// Sign-extended 11-bit PC offset (`JSR`).
    fn pc_offset11(&self) -> i16;

    /// Unsigned 8-bit trap vector.
    fn trap_vector(&self) -> u8;

    /// Shift amount of `SHF` (bits 3-0).
    fn shift_amount(&self) -> u32;

    /// Shift type of `SHF` (bits 5-4).
    fn shift_type(&self) -> u8;

    /// Six-bit control-store address: IR\[15:11\] followed by IR\[5\].
    fn control_store_address(&self) -> Bits6;
}

impl InstructionBits for Word {
    #[inline]
    fn opcode(&self) -> u8 {
        self.range::<15, 12, 4>().value() as u8
    }

    #[inline]
    fn dr(&self) -> Bits3 {
        self.range::<11, 9, 3>()
    }

    #[inline]
    fn sr1(&self) -> Bits3 {
        self.range::<8, 6, 3>()
    }

    #[inline]
    fn sr2(&self) -> Bits3 {
        self.range::<2, 0, 3>()
    }

    #[inline]
    fn nzp(&self) -> Bits3 {
        self.range::<11, 9, 3>()
    }

    #[inline]
    fn imm_mode(&self) -> bool {
        self.at::<5>()
    }

    fn imm5(&self) -> i16 {
        self.range::<4, 0, 5>().to_signed() as i16
    }

    fn offset6(&self) -> i16 {
        self.range::<5, 0, 6>().to_signed() as i16
    }

    fn pc_offset9(&self) -> i16 {
        self.range::<8, 0, 9>().to_signed() as i16
    }

    fn pc_offset11(&self) -> i16 {
        self.range::<10, 0, 11>().to_signed() as i16
    }

    fn trap_vector(&self) -> u8 {
        self.range::<7, 0, 8>().value() as u8
    }

    fn shift_amount(&self) -> u32 {
        self.range::<3, 0, 4>().value() as u32
    }

    fn shift_type(&self) -> u8 {
        self.range::<5, 4, 2>().value() as u8
    }

    fn control_store_address(&self) -> Bits6 {
        let upper: Bits<5> = self.range::<15, 11, 5>();
        Bits6::new((upper.value() << 1) | u64::from(self.at::<5>()))
    }
}
