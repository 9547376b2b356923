use lc3b_pipe_core::common::bits::Word;
use lc3b_pipe_core::core::pipeline::signals::AluOp;
use lc3b_pipe_core::core::units::alu::Alu;
use lc3b_pipe_core::core::units::alu::shifts::{self, ShiftKind};
use rstest::rstest;

fn w(v: u16) -> Word {
    Word::new(u64::from(v))
}

#[rstest]
#[case(AluOp::Add, 0x7FFF, 0x0001, 0x8000)]
#[case(AluOp::Add, 0xFFFA, 0x0006, 0x0000)]
#[case(AluOp::And, 0xF0F0, 0x3C3C, 0x3030)]
#[case(AluOp::Xor, 0xFFFF, 0x1234, 0xEDCB)]
#[case(AluOp::PassB, 0x1111, 0x2222, 0x2222)]
fn alu_operations(#[case] op: AluOp, #[case] a: u16, #[case] b: u16, #[case] expected: u16) {
    assert_eq!(Alu::execute(op, w(a), w(b)).value(), u64::from(expected));
}

#[test]
fn shift_kind_decodes_ir5_4() {
    assert_eq!(ShiftKind::from_bits(0b00), ShiftKind::Left);
    assert_eq!(ShiftKind::from_bits(0b01), ShiftKind::RightLogical);
    assert_eq!(ShiftKind::from_bits(0b11), ShiftKind::RightArithmetic);
}

#[test]
fn reserved_shift_type_shifts_left() {
    // IR[4] clear selects the left shift whatever IR[5] holds.
    assert_eq!(ShiftKind::from_bits(0b10), ShiftKind::Left);
    assert_eq!(shifts::execute(ShiftKind::from_bits(0b10), w(0x0003), 4).value(), 0x0030);
}

#[rstest]
#[case(ShiftKind::Left, 0x0001, 15, 0x8000)]
#[case(ShiftKind::Left, 0x8001, 1, 0x0002)]
#[case(ShiftKind::RightLogical, 0x8000, 15, 0x0001)]
#[case(ShiftKind::RightArithmetic, 0x8000, 15, 0xFFFF)]
#[case(ShiftKind::RightArithmetic, 0x4000, 2, 0x1000)]
#[case(ShiftKind::RightLogical, 0xABCD, 0, 0xABCD)]
fn shifter(#[case] kind: ShiftKind, #[case] value: u16, #[case] amount: u32, #[case] expected: u16) {
    assert_eq!(shifts::execute(kind, w(value), amount).value(), u64::from(expected));
}
