//! # Configuration Tests
//!
//! JSON deserialization, per-field defaults, and file loading.

use std::io::Write;

use lc3b_pipe_core::common::error::SimError;
use lc3b_pipe_core::config::Config;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

#[test]
fn empty_document_is_the_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn defaults_match_the_reference_machine() {
    let config = Config::default();
    assert_eq!(config.memory.icache_miss_period, 13);
    assert_eq!(config.memory.dcache_miss_period, 9);
    assert_eq!(config.general.max_cycles, None);
    assert_eq!(config.general.history_limit, 1024);
    assert!(!config.microcode.allow_comments);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = Config::from_json(r#"{ "memory": { "dcache_miss_period": 0 } }"#).unwrap();
    assert_eq!(config.memory.dcache_miss_period, 0);
    assert_eq!(config.memory.icache_miss_period, 13);
    assert_eq!(config.general, Config::default().general);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = Config::from_json(r#"{ "general": { "max_cycles": "lots" } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)), "got {err:?}");
}

#[test]
fn loads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "general": {{ "trace_instructions": true, "history_limit": 4 }} }}"#).unwrap();
    file.flush().unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.general.trace_instructions);
    assert_eq!(config.general.history_limit, 4);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Config::from_file("/nonexistent/lc3b-config.json").unwrap_err();
    assert!(matches!(err, SimError::Io { .. }), "got {err:?}");
}
