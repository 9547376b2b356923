//! Instruction Disassembler for LC-3b.
//!
//! Converts a 16-bit instruction word into a human-readable mnemonic string for
//! the latch dump and the timing diagram. Execution never consults it.
//!
//! # Usage
//!
//! ```
//! use lc3b_pipe_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x1283), "ADD R1, R2, R3");
//! assert_eq!(disassemble(0xF025), "HALT");
//! ```

use std::fmt::Write;

use crate::common::bits::Word;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{self as op, trap_vectors};

/// Returns the name of a known trap vector.
fn trap_name(vector: u8) -> Option<&'static str> {
    match vector {
        trap_vectors::GETC => Some("GETC"),
        trap_vectors::OUT => Some("OUT"),
        trap_vectors::PUTS => Some("PUTS"),
        trap_vectors::IN => Some("IN"),
        trap_vectors::PUTSP => Some("PUTSP"),
        trap_vectors::HALT => Some("HALT"),
        _ => None,
    }
}

/// Disassembles an instruction word into its canonical mnemonic.
///
/// # Arguments
///
/// * `raw` - The instruction word.
///
/// # Returns
///
/// A mnemonic such as `"BRz #-3"`, `"LDR R1, R6, #2"` or `"HALT"`, or
/// `"UNKNOWN"` for encodings with no assigned meaning.
pub fn disassemble(raw: u16) -> String {
    let inst = Word::new(u64::from(raw));
    let dr = inst.dr().value();
    let base = inst.sr1().value();

    match inst.opcode() {
        op::OP_BR => format_branch(inst),
        op::OP_ADD | op::OP_AND | op::OP_XOR => format_operate(inst),
        op::OP_LDB => format!("LD R{dr}, #{}", inst.pc_offset9()),
        op::OP_STB => format!("ST R{dr}, #{}", inst.pc_offset9()),
        op::OP_JSR => {
            if inst.at::<11>() {
                format!("JSR #{}", inst.pc_offset11())
            } else {
                format!("JSRR R{base}")
            }
        }
        op::OP_LDW => format!("LDR R{dr}, R{base}, #{}", inst.offset6()),
        op::OP_STW => format!("STR R{dr}, R{base}, #{}", inst.offset6()),
        op::OP_RTI => "RTI".to_string(),
        op::OP_RESERVED_A => format!("LDI R{dr}, #{}", inst.pc_offset9()),
        op::OP_RESERVED_B => format!("STI R{dr}, #{}", inst.pc_offset9()),
        op::OP_JMP => {
            if base == 7 {
                "RET".to_string()
            } else {
                format!("JMP R{base}")
            }
        }
        op::OP_SHF => format_shift(inst),
        op::OP_LEA => format!("LEA R{dr}, #{}", inst.pc_offset9()),
        op::OP_TRAP => {
            let vector = inst.trap_vector();
            trap_name(vector).map_or_else(|| format!("TRAP x{vector:X}"), str::to_string)
        }
        _ => "UNKNOWN".to_string(),
    }
}

fn format_branch(inst: Word) -> String {
    let n = inst.at::<11>();
    let z = inst.at::<10>();
    let p = inst.at::<9>();
    if !n && !z && !p {
        return "NOP".to_string();
    }

    let mut text = String::from("BR");
    if n {
        text.push('n');
    }
    if z {
        text.push('z');
    }
    if p {
        text.push('p');
    }
    let _ = write!(text, " #{}", inst.pc_offset9());
    text
}

fn format_operate(inst: Word) -> String {
    let dr = inst.dr().value();
    let sr1 = inst.sr1().value();

    let mnemonic = match inst.opcode() {
        op::OP_ADD => "ADD",
        op::OP_AND => "AND",
        _ => {
            if inst.imm_mode() && inst.range::<4, 0, 5>().value() == 0x1F {
                return format!("NOT R{dr}, R{sr1}");
            }
            "XOR"
        }
    };

    if inst.imm_mode() {
        format!("{mnemonic} R{dr}, R{sr1}, #{}", inst.imm5())
    } else {
        format!("{mnemonic} R{dr}, R{sr1}, R{}", inst.sr2().value())
    }
}

fn format_shift(inst: Word) -> String {
    let mnemonic = match inst.shift_type() {
        0b00 => "LSHF",
        0b01 => "RSHFL",
        0b11 => "RSHFA",
        _ => return "UNKNOWN SHIFT".to_string(),
    };
    format!(
        "{mnemonic} R{}, R{}, #{}",
        inst.dr().value(),
        inst.sr1().value(),
        inst.shift_amount()
    )
}
