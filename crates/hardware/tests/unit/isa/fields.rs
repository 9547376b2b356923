use lc3b_pipe_core::common::bits::Word;
use lc3b_pipe_core::isa::instruction::InstructionBits;
use lc3b_pipe_core::isa::opcodes::{OP_ADD, OP_BR, OP_TRAP};

use crate::common::builder::instruction::*;

fn word(raw: u16) -> Word {
    Word::new(u64::from(raw))
}

#[test]
fn operate_fields() {
    let ir = word(add(3, 4, 5));
    assert_eq!(ir.opcode(), OP_ADD);
    assert_eq!(ir.dr().value(), 3);
    assert_eq!(ir.sr1().value(), 4);
    assert_eq!(ir.sr2().value(), 5);
    assert!(!ir.imm_mode());

    let imm = word(add_imm(3, 4, -1));
    assert!(imm.imm_mode());
    assert_eq!(imm.imm5(), -1);
}

#[test]
fn signed_offsets() {
    assert_eq!(word(ldw(0, 0, -32)).offset6(), -32);
    assert_eq!(word(br(true, false, false, -256)).pc_offset9(), -256);
    assert_eq!(word(jsr(1023)).pc_offset11(), 1023);
    assert_eq!(word(br(false, true, false, 1)).opcode(), OP_BR);
}

#[test]
fn trap_and_shift_fields() {
    let ir = word(halt());
    assert_eq!(ir.opcode(), OP_TRAP);
    assert_eq!(ir.trap_vector(), 0x25);

    let shf = word(rshfa(1, 2, 9));
    assert_eq!(shf.shift_type(), 0b11);
    assert_eq!(shf.shift_amount(), 9);
}

#[test]
fn control_store_address_joins_opcode_ir11_and_ir5() {
    // BR: opcode 0, IR11 = n bit.
    assert_eq!(word(br(true, false, false, 0)).control_store_address().value(), 0b000010);
    // ADD immediate: opcode 1, IR11 = 0, IR5 = 1.
    assert_eq!(word(add_imm(1, 1, 5)).control_store_address().value(), 0b000101);
    // JSR: opcode 4, IR11 = 1.
    assert_eq!(word(jsr(2)).control_store_address().value(), 0b010010);
    // JSRR: opcode 4, IR11 = 0.
    assert_eq!(word(jsrr(3)).control_store_address().value(), 0b010000);
    // TRAP x25: IR11 = 0, IR5 = 1.
    assert_eq!(word(halt()).control_store_address().value(), 0b111101);
}
