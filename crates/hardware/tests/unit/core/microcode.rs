//! # Control Store Tests
//!
//! Parsing the micro-code image, the strict and relaxed syntaxes, and the
//! decoding of named fields into per-stage control slices.

use lc3b_pipe_core::common::error::SimError;
use lc3b_pipe_core::config::MicrocodeConfig;
use lc3b_pipe_core::core::microcode::{ControlStore, ControlWord, CsBit, Field};
use lc3b_pipe_core::core::pipeline::signals::{
    Addr1Mux, Addr2Mux, AgexControlSignals, AluOp, DataSize, DecodeControlSignals, DrMux,
    DrValueMux, ResultMux, Sr2Mux,
};
use pretty_assertions::assert_eq;

use crate::common::harness::{UCODE, default_control_store};

const STRICT: MicrocodeConfig = MicrocodeConfig {
    allow_comments: false,
    ignore_whitespace: false,
};

fn rows() -> Vec<&'static str> {
    UCODE.lines().collect()
}

// ══════════════════════════════════════════════════════════
// 1. Parsing
// ══════════════════════════════════════════════════════════

#[test]
fn shipped_image_has_sixty_four_rows() {
    let store = default_control_store();
    assert_eq!(store.rows().count(), 64);
    assert_eq!(store.get_word(5).unwrap().to_row(), rows()[5]);
}

#[test]
fn too_few_rows_is_rejected() {
    let text = rows()[..63].join("\n");
    let err = ControlStore::parse(&text, &STRICT).unwrap_err();
    assert!(
        matches!(err, SimError::MicrocodeTooFewRows { expected: 64, found: 63 }),
        "got {err:?}"
    );
}

#[test]
fn short_row_is_rejected() {
    let mut lines = rows();
    lines[0] = "0000101100001001000000";
    let err = ControlStore::parse(&lines.join("\n"), &STRICT).unwrap_err();
    assert!(
        matches!(err, SimError::MicrocodeTooFewBits { row: 0, expected: 23, found: 22 }),
        "got {err:?}"
    );
}

#[test]
fn bad_digit_reports_row_and_column() {
    let mut lines = rows();
    lines[2] = "00001211000010010000000";
    let err = ControlStore::parse(&lines.join("\n"), &STRICT).unwrap_err();
    assert!(
        matches!(err, SimError::MicrocodeBadBit { row: 2, column: 5, found: '2' }),
        "got {err:?}"
    );
}

#[test]
fn extra_rows_and_columns_are_ignored() {
    let mut lines: Vec<String> = rows().iter().map(|r| format!("{r}1")).collect();
    lines.push(rows()[0].to_string());
    let store = ControlStore::parse(&lines.join("\n"), &STRICT).unwrap();
    assert_eq!(store, default_control_store());
}

#[test]
fn comments_need_the_relaxed_syntax() {
    let text = format!("# LC-3b control store\n\n{}", rows().join("  # row\n"));

    let err = ControlStore::parse(&text, &STRICT).unwrap_err();
    assert!(
        matches!(err, SimError::MicrocodeBadBit { row: 0, column: 0, found: '#' }),
        "got {err:?}"
    );

    let relaxed = MicrocodeConfig {
        allow_comments: true,
        ..STRICT
    };
    assert_eq!(ControlStore::parse(&text, &relaxed).unwrap(), default_control_store());
}

#[test]
fn whitespace_inside_rows_can_be_skipped() {
    let spaced: Vec<String> = rows()
        .iter()
        .map(|r| format!("{} {}\t{}", &r[..3], &r[3..12], &r[12..]))
        .collect();
    let text = spaced.join("\n");
    assert!(ControlStore::parse(&text, &STRICT).is_err());

    let relaxed = MicrocodeConfig {
        ignore_whitespace: true,
        ..STRICT
    };
    assert_eq!(ControlStore::parse(&text, &relaxed).unwrap(), default_control_store());
}

#[test]
fn row_lookup_is_bounds_checked() {
    let store = default_control_store();
    assert!(matches!(store.get_word(64), Err(SimError::InvalidControlStoreRow(64))));
    assert_eq!(store.get_field(5, Field::Sr2Mux).unwrap(), 1);
}

// ══════════════════════════════════════════════════════════
// 2. Control words and fields
// ══════════════════════════════════════════════════════════

#[test]
fn two_bit_fields_are_msb_first() {
    let word = ControlWord::EMPTY.with_field(Field::Aluk, 0b10);
    assert!(word.bit(CsBit::Aluk1));
    assert!(!word.bit(CsBit::Aluk0));
    assert_eq!(word.field(Field::Aluk), 2);

    let row = word.to_row();
    assert_eq!(&row[9..11], "10");
    assert_eq!(row.chars().filter(|c| *c == '1').count(), 1);
}

#[test]
fn fields_do_not_overlap() {
    for field in Field::ALL {
        let word = ControlWord::EMPTY.with_field(field, 0xFF);
        for other in Field::ALL.into_iter().filter(|f| *f != field) {
            assert_eq!(word.field(other), 0, "{} leaked into {}", field.name(), other.name());
        }
    }
}

#[test]
fn from_row_round_trips() {
    let word = ControlWord::from_row("10010111000000001010111").unwrap();
    assert_eq!(word.to_row(), "10010111000000001010111");
    assert!(ControlWord::from_row("1001").is_err());
}

// ══════════════════════════════════════════════════════════
// 3. Decoded slices of the shipped image
// ══════════════════════════════════════════════════════════

#[test]
fn add_immediate_row() {
    let word = default_control_store().get_word(0b000101).unwrap();
    let de = DecodeControlSignals::from_word(word);
    assert!(de.sr1_needed && !de.sr2_needed);
    assert_eq!(de.dr_mux, DrMux::Ir11_9);

    let agex = AgexControlSignals::from_word(word);
    assert_eq!(agex.sr2_mux, Sr2Mux::Immediate);
    assert_eq!(agex.aluk, AluOp::Add);
    assert_eq!(agex.alu_result_mux, ResultMux::Alu);
    assert_eq!(agex.mem.store.dr_value_mux, DrValueMux::AluResult);
    assert!(agex.mem.store.ld_reg && agex.mem.store.ld_cc);
}

#[test]
fn ldw_row() {
    let agex = AgexControlSignals::from_word(default_control_store().get_word(0b011000).unwrap());
    assert_eq!(agex.addr1_mux, Addr1Mux::BaseR);
    assert_eq!(agex.addr2_mux, Addr2Mux::Offset6);
    assert!(agex.lshf1);
    assert!(agex.mem.dcache_en && !agex.mem.dcache_rw);
    assert_eq!(agex.mem.data_size, DataSize::Word);
    assert_eq!(agex.mem.store.dr_value_mux, DrValueMux::Data);
}

#[test]
fn control_rows_stall_the_front_end() {
    let store = default_control_store();
    let br = DecodeControlSignals::from_word(store.get_word(0).unwrap());
    assert!(br.br_op && br.br_stall);

    let jsr = DecodeControlSignals::from_word(store.get_word(0b010010).unwrap());
    assert_eq!(jsr.dr_mux, DrMux::R7);
    assert!(jsr.br_stall && !jsr.br_op);

    let trap = AgexControlSignals::from_word(store.get_word(0b111101).unwrap());
    assert!(trap.mem.trap_op && trap.mem.br_stall && trap.mem.dcache_en);
    assert_eq!(trap.mem.store.dr_value_mux, DrValueMux::Npc);
}

#[test]
fn unused_opcodes_are_empty() {
    let store = default_control_store();
    for row in [0b100000, 0b101000, 0b101100] {
        assert_eq!(store.get_word(row).unwrap(), ControlWord::EMPTY, "row {row}");
    }
}
