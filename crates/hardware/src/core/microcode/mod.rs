//! Control Store.
//!
//! The control store is the ROM that maps a decoded instruction to the bundle of
//! enables and mux selects driving the rest of the pipeline. It provides:
//! 1. **Storage:** 64 rows of 23-bit [`ControlWord`]s, immutable once loaded.
//! 2. **Parsing:** The one-row-per-line text format, with optional comments and whitespace.
//! 3. **Field access:** Named-field reads by row, for the decode stage and for dumps.
//!
//! Rows are addressed by IR\[15:11\] concatenated with IR\[5\]
//! (see [`InstructionBits::control_store_address`](crate::isa::instruction::InstructionBits::control_store_address)).

/// Control words and named fields.
pub mod word;

use std::fmt;

pub use self::word::{ControlWord, CsBit, Field};
use crate::common::bits::Bits6;
use crate::common::constants::{CONTROL_STORE_BITS, CONTROL_STORE_ROWS};
use crate::common::error::{Result, SimError};
use crate::config::MicrocodeConfig;

/// The microcode ROM.
#[derive(Clone, PartialEq, Eq)]
pub struct ControlStore {
    rows: [ControlWord; CONTROL_STORE_ROWS],
}

impl Default for ControlStore {
    fn default() -> Self {
        Self {
            rows: [ControlWord::EMPTY; CONTROL_STORE_ROWS],
        }
    }
}

impl ControlStore {
    /// Builds a control store from explicit rows.
    pub const fn from_rows(rows: [ControlWord; CONTROL_STORE_ROWS]) -> Self {
        Self { rows }
    }

    /// Parses a microcode image.
    ///
    /// Each of the first 64 significant lines supplies one row, one `0`/`1` character
    /// per column. Empty lines are skipped. With `allow_comments`, `#` starts a comment
    /// and comment-only lines are skipped; with `ignore_whitespace`, spaces and tabs
    /// inside a row are dropped. Characters past column 23 only produce a warning.
    ///
    /// # Errors
    ///
    /// * [`SimError::MicrocodeTooFewRows`] - fewer than 64 rows.
    /// * [`SimError::MicrocodeTooFewBits`] - a row shorter than 23 columns.
    /// * [`SimError::MicrocodeBadBit`] - a column that is neither `0` nor `1`.
    pub fn parse(text: &str, syntax: &MicrocodeConfig) -> Result<Self> {
        let mut rows = [ControlWord::EMPTY; CONTROL_STORE_ROWS];
        let mut lines = text
            .lines()
            .map(|line| clean_line(line, syntax))
            .filter(|line| !line.is_empty());

        for (row, slot) in rows.iter_mut().enumerate() {
            let line = lines.next().ok_or(SimError::MicrocodeTooFewRows {
                expected: CONTROL_STORE_ROWS,
                found: row,
            })?;
            *slot = parse_row(row, &line)?;
        }

        if lines.next().is_some() {
            tracing::warn!(
                rows = CONTROL_STORE_ROWS,
                "micro-code image has lines past the last control-store row; ignoring them"
            );
        }
        Ok(Self { rows })
    }

    /// The word at a decoded control-store address.
    #[inline]
    pub const fn word(&self, addr: Bits6) -> ControlWord {
        self.rows[addr.as_usize()]
    }

    /// The word at a numeric row.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidControlStoreRow`] for rows outside `0..64`.
    pub fn get_word(&self, row: usize) -> Result<ControlWord> {
        self.rows
            .get(row)
            .copied()
            .ok_or(SimError::InvalidControlStoreRow(row))
    }

    /// A named field of a numeric row.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidControlStoreRow`] for rows outside `0..64`.
    pub fn get_field(&self, row: usize, field: Field) -> Result<u8> {
        self.get_word(row).map(|word| word.field(field))
    }

    /// Iterates the rows in address order.
    pub fn rows(&self) -> impl Iterator<Item = ControlWord> + '_ {
        self.rows.iter().copied()
    }
}

fn clean_line(line: &str, syntax: &MicrocodeConfig) -> String {
    let mut line = line.trim_end_matches('\r');
    if syntax.allow_comments {
        if let Some(at) = line.find('#') {
            line = &line[..at];
        }
        line = line.trim();
    }
    if syntax.ignore_whitespace {
        line.chars().filter(|c| *c != ' ' && *c != '\t').collect()
    } else {
        line.to_string()
    }
}

fn parse_row(row: usize, line: &str) -> Result<ControlWord> {
    let mut word = ControlWord::EMPTY;
    let mut chars = line.chars();
    for column in CsBit::ALL {
        let bit = match chars.next() {
            Some('0') => false,
            Some('1') => true,
            Some(found) => {
                return Err(SimError::MicrocodeBadBit {
                    row,
                    column: column.column(),
                    found,
                });
            }
            None => {
                return Err(SimError::MicrocodeTooFewBits {
                    row,
                    expected: CONTROL_STORE_BITS,
                    found: column.column(),
                });
            }
        };
        word = word.with(column, bit);
    }
    if chars.next().is_some() {
        tracing::warn!(row, "extra bit(s) in micro-code row");
    }
    Ok(word)
}

impl fmt::Debug for ControlStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows.iter()).finish()
    }
}
