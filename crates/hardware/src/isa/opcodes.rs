//! LC-3b Opcodes.
//!
//! Defines the major opcodes (bits 15-12) and the named trap vectors.

/// Conditional branch (BR, BRn, BRz, ...). `nzp = 000` is a no-op.
pub const OP_BR: u8 = 0b0000;

/// Register or immediate addition.
pub const OP_ADD: u8 = 0b0001;

/// Load byte, sign-extended (`LDB`).
pub const OP_LDB: u8 = 0b0010;

/// Store byte (`STB`).
pub const OP_STB: u8 = 0b0011;

/// Subroutine call, PC-relative (`JSR`, IR\[11\] = 1) or register (`JSRR`).
pub const OP_JSR: u8 = 0b0100;

/// Register or immediate bitwise AND.
pub const OP_AND: u8 = 0b0101;

/// Load word (`LDW`).
pub const OP_LDW: u8 = 0b0110;

/// Store word (`STW`).
pub const OP_STW: u8 = 0b0111;

/// Return from interrupt.
pub const OP_RTI: u8 = 0b1000;

/// Register or immediate XOR; `NOT` is XOR with an all-ones immediate.
pub const OP_XOR: u8 = 0b1001;

/// Unused in LC-3b (LDI in LC-3).
pub const OP_RESERVED_A: u8 = 0b1010;

/// Unused in LC-3b (STI in LC-3).
pub const OP_RESERVED_B: u8 = 0b1011;

/// Register jump; base register 7 is `RET`.
pub const OP_JMP: u8 = 0b1100;

/// Shifts (`LSHF`, `RSHFL`, `RSHFA`).
pub const OP_SHF: u8 = 0b1101;

/// Load effective address.
pub const OP_LEA: u8 = 0b1110;

/// System call through the trap vector table.
pub const OP_TRAP: u8 = 0b1111;

/// Named trap vectors.
pub mod trap_vectors {
    /// Read a character from the keyboard.
    pub const GETC: u8 = 0x20;
    /// Write a character to the console.
    pub const OUT: u8 = 0x21;
    /// Write a string of words.
    pub const PUTS: u8 = 0x22;
    /// Prompt and read a character.
    pub const IN: u8 = 0x23;
    /// Write a string of packed bytes.
    pub const PUTSP: u8 = 0x24;
    /// Stop the machine.
    pub const HALT: u8 = 0x25;
}
