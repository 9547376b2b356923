//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the LC-3b opcodes, field extraction for the 16-bit instruction
//! format, and the disassembler used by the diagnostic dumps.

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction field extraction.
pub mod instruction;

/// Major opcodes and trap vectors.
pub mod opcodes;
