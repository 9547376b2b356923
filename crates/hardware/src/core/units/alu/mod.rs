//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 16-bit ALU and shifter used in the AGEX stage.
//! The ALU selects among four operations with the 2-bit `ALUK` field; the
//! shifter is chosen instead when `ALU.RESULTMUX` is clear.
//!
//! Operations are organized as follows:
//! - [`Alu::execute`]: Add, And, Xor, PassB
//! - [`shifts`]:       LSHF, RSHFL, RSHFA

/// Shift operations (LSHF, RSHFL, RSHFA).
pub mod shifts;

use crate::common::bits::Word;
use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit for 16-bit operations.
///
/// All results wrap at 16 bits, as the hardware does.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand (SR1)
    /// * `b`  - Second operand (SR2 or the immediate)
    ///
    /// # Returns
    ///
    /// The 16-bit result.
    ///
    /// # Examples
    ///
    /// ```
    /// use lc3b_pipe_core::common::Word;
    /// use lc3b_pipe_core::core::pipeline::signals::AluOp;
    /// use lc3b_pipe_core::core::units::alu::Alu;
    ///
    /// let sum = Alu::execute(AluOp::Add, Word::new(0xFFFF), Word::new(2));
    /// assert_eq!(sum.value(), 1);
    ///
    /// let passed = Alu::execute(AluOp::PassB, Word::new(7), Word::new(0x1234));
    /// assert_eq!(passed.value(), 0x1234);
    /// ```
    pub fn execute(op: AluOp, a: Word, b: Word) -> Word {
        match op {
            AluOp::Add => a + b,
            AluOp::And => a & b,
            AluOp::Xor => a ^ b,
            AluOp::PassB => b,
        }
    }
}
