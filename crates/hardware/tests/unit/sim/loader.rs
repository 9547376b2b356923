//! # Loader Tests
//!
//! Program text parsing, installation into memory, and file errors.

use std::io::Write;
use std::path::Path;

use lc3b_pipe_core::common::bits::Word;
use lc3b_pipe_core::common::error::{FileKind, SimError};
use lc3b_pipe_core::config::MicrocodeConfig;
use lc3b_pipe_core::sim::loader::{self, ProgramImage};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use crate::common::harness::{ORIGIN, TestContext, UCODE};

fn words(raw: &[u16]) -> Vec<Word> {
    raw.iter().map(|w| Word::new(u64::from(*w))).collect()
}

fn parse(text: &str) -> Result<ProgramImage, SimError> {
    loader::parse_program(text, Path::new("prog.hex"))
}

#[test]
fn first_token_is_the_byte_origin() {
    let image = parse("0x3000\n0x1265\nx5020\n  F025 ").unwrap();
    assert_eq!(image.base_word, 0x1800);
    assert_eq!(image.origin().value(), 0x3000);
    assert_eq!(image.words, words(&[0x1265, 0x5020, 0xF025]));
}

#[test]
fn origin_alone_is_an_empty_image() {
    let image = parse("x4000").unwrap();
    assert!(image.is_empty());
    assert_eq!(image.base_word, 0x2000);
}

#[test]
fn blank_file_is_rejected() {
    let err = parse(" \n\t").unwrap_err();
    assert!(matches!(err, SimError::ProgramEmpty { .. }), "got {err:?}");
}

#[test]
fn bad_token_reports_its_position() {
    let err = parse("0x3000 0x1265 0xZZZZ").unwrap_err();
    match err {
        SimError::ProgramBadToken { index, token, .. } => {
            assert_eq!(index, 2);
            assert_eq!(token, "0xZZZZ");
        }
        other => panic!("expected ProgramBadToken, got {other:?}"),
    }
}

#[test]
fn oversized_word_is_a_bad_token() {
    let err = parse("0x3000 0x10000").unwrap_err();
    assert!(matches!(err, SimError::ProgramBadToken { index: 1, .. }), "got {err:?}");
}

#[test]
fn program_running_off_the_end_of_memory() {
    let err = parse("0xFFFE 0x0001 0x0002").unwrap_err();
    match err {
        SimError::ProgramTooLarge { word_addr, .. } => assert_eq!(word_addr, 0x8000),
        other => panic!("expected ProgramTooLarge, got {other:?}"),
    }
}

#[test]
fn first_program_sets_the_pc() {
    let mut ctx = TestContext::new();
    let first = parse("0x3000 0x1265").unwrap();
    let second = parse("0x4000 0xF025").unwrap();
    ctx.sim.install_program(&first).unwrap();
    ctx.sim.install_program(&second).unwrap();

    assert_eq!(ctx.pc(), ORIGIN);
    assert_eq!(ctx.word_at(0x3000), 0x1265);
    assert_eq!(ctx.word_at(0x4000), 0xF025);
}

#[test]
fn loads_program_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "0x3000\n0x1265\n0xF025").unwrap();
    file.flush().unwrap();

    let mut ctx = TestContext::new();
    let image = ctx.sim.load_program(file.path()).unwrap();
    assert_eq!(image.len(), 2);
    assert_eq!(ctx.word_at(0x3002), 0xF025);
}

#[test]
fn missing_program_file_names_its_kind() {
    let mut ctx = TestContext::new();
    let err = ctx.sim.load_program("/nonexistent/prog.hex").unwrap_err();
    assert!(
        matches!(err, SimError::Io { kind: FileKind::Program, .. }),
        "got {err:?}"
    );
    assert!(err.to_string().starts_with("cannot open program file"));
}

#[test]
fn loads_control_store_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(UCODE.as_bytes()).unwrap();
    file.flush().unwrap();

    let store = loader::load_control_store(file.path(), &MicrocodeConfig::default()).unwrap();
    assert_eq!(store.rows().count(), 64);
    assert_eq!(store.get_word(5).unwrap().to_row(), "10000000100100000001111");
}

#[test]
fn missing_control_store_file() {
    let err = loader::load_control_store("/nonexistent/lc3b.ucode", &MicrocodeConfig::default())
        .unwrap_err();
    assert!(
        matches!(err, SimError::Io { kind: FileKind::Microcode, .. }),
        "got {err:?}"
    );
}
