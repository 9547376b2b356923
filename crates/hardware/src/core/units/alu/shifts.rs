//! Shifter.
//!
//! Implements shift-left (LSHF), shift-right logical (RSHFL), and shift-right
//! arithmetic (RSHFA) on 16-bit values. The shift amount is IR\[3:0\]; the kind is
//! IR\[5:4\], where IR\[4\] selects a right shift and IR\[5\] makes it arithmetic.

use crate::common::bits::Word;

/// Shift kind decoded from IR\[5:4\].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftKind {
    /// Shift left, filling with zeros.
    Left,
    /// Shift right, filling with zeros.
    RightLogical,
    /// Shift right, filling with the sign bit.
    RightArithmetic,
}

impl ShiftKind {
    /// Decodes IR\[5:4\].
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b01 => Self::RightLogical,
            0b11 => Self::RightArithmetic,
            _ => Self::Left,
        }
    }
}

/// Executes a shift.
///
/// # Arguments
///
/// * `kind`   - Direction and fill.
/// * `value`  - The value to shift (SR1).
/// * `amount` - Bit positions to shift, 0 through 15.
///
/// # Returns
///
/// The shifted 16-bit value.
pub fn execute(kind: ShiftKind, value: Word, amount: u32) -> Word {
    match kind {
        ShiftKind::Left => value << amount,
        ShiftKind::RightLogical => value >> amount,
        ShiftKind::RightArithmetic => Word::new((value.to_signed() >> amount.min(15)) as u64),
    }
}
