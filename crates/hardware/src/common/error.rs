//! Error definitions.
//!
//! The simulator distinguishes two classes of failure:
//! 1. **Configuration/IO errors:** unreadable or malformed microcode, program, or config files,
//!    and out-of-range register, memory, or control-store indices. These are fatal; the CLI
//!    reports them and exits.
//! 2. **Transient pipeline conditions:** cache-not-ready and hazard stalls. These are not
//!    errors and never appear here; they travel through the stall signal bundle.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the fixed-width bit container.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BitsError {
    /// A value has bits set at or above the container width.
    #[error("value {value:#x} does not fit in {width} bits")]
    Overflow {
        /// Offending value.
        value: u64,
        /// Container width.
        width: u32,
    },

    /// A single-bit access named a position outside the container.
    #[error("bit index {index} out of range for a {width}-bit value")]
    IndexOutOfRange {
        /// Requested bit position.
        index: u32,
        /// Container width.
        width: u32,
    },

    /// A bit string had the wrong number of digits.
    #[error("expected {expected} binary digits, found {found}")]
    LengthMismatch {
        /// Container width.
        expected: u32,
        /// Digits supplied.
        found: usize,
    },

    /// A bit string contained a character other than `0` or `1`.
    #[error("invalid binary digit {digit:?} at position {position}")]
    InvalidDigit {
        /// Offending character.
        digit: char,
        /// Zero-based character position.
        position: usize,
    },
}

/// The kind of input file an I/O error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Control-store image.
    Microcode,
    /// Machine-code program.
    Program,
    /// JSON configuration document.
    Config,
    /// Diagnostic dump output.
    Dump,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Microcode => "micro-code",
            Self::Program => "program",
            Self::Config => "configuration",
            Self::Dump => "dump",
        };
        f.write_str(name)
    }
}

/// Fatal simulator errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file could not be opened or read.
    #[error("cannot open {kind} file `{}`: {source}", path.display())]
    Io {
        /// What the file was meant to contain.
        kind: FileKind,
        /// Path as given.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The microcode image has fewer rows than the control store.
    #[error("micro-code image has too few rows: expected {expected}, found {found}")]
    MicrocodeTooFewRows {
        /// Control-store row count.
        expected: usize,
        /// Rows present.
        found: usize,
    },

    /// A microcode row has fewer bits than a control word.
    #[error("micro-code row {row} has too few bits: expected {expected}, found {found}")]
    MicrocodeTooFewBits {
        /// Zero-based row.
        row: usize,
        /// Bits per control word.
        expected: usize,
        /// Bits present.
        found: usize,
    },

    /// A microcode row contains something other than `0`/`1`.
    #[error("micro-code row {row}, column {column}: unknown value {found:?}")]
    MicrocodeBadBit {
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        column: usize,
        /// Offending character.
        found: char,
    },

    /// A program file contained no load address.
    #[error("program file `{}` is empty", path.display())]
    ProgramEmpty {
        /// Path as given.
        path: PathBuf,
    },

    /// A program file contained a token that is not a hexadecimal number.
    #[error("program file `{}`, token {index}: invalid hex word `{token}`", path.display())]
    ProgramBadToken {
        /// Path as given.
        path: PathBuf,
        /// Zero-based token position.
        index: usize,
        /// The token text.
        token: String,
    },

    /// A program runs past the end of memory.
    #[error("program file `{}` is too big to fit in memory (word address {word_addr:#06x})", path.display())]
    ProgramTooLarge {
        /// Path as given.
        path: PathBuf,
        /// First word address that did not fit.
        word_addr: usize,
    },

    /// A register index outside `0..8`.
    #[error("register index {0} out of range")]
    InvalidRegister(usize),

    /// A memory word address outside `0..WORDS_IN_MEM`.
    #[error("memory word address {0:#x} out of range")]
    InvalidMemoryAddress(usize),

    /// A control-store row outside `0..64`.
    #[error("control-store row {0} out of range")]
    InvalidControlStoreRow(usize),

    /// The configuration document could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A bit-container operation failed.
    #[error(transparent)]
    Bits(#[from] BitsError),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = SimError> = std::result::Result<T, E>;
