//! Microcode and Program Loading.
//!
//! This module reads the two kinds of input the simulator needs from disk. It performs:
//! 1. **Microcode loading:** Reads a control-store image and parses it with the configured syntax.
//! 2. **Program parsing:** Turns a text file of hexadecimal words into a [`ProgramImage`].
//!    The first word is the byte address the program starts at; each following word is
//!    stored at successive word addresses.
//! 3. **Program installation:** Writes an image into main memory and, if the PC is
//!    still 0, points the PC at its first word.

use std::fs;
use std::path::Path;

use crate::common::bits::Word;
use crate::common::constants::WORDS_IN_MEM;
use crate::common::error::{FileKind, Result, SimError};
use crate::config::MicrocodeConfig;
use crate::core::Cpu;
use crate::core::microcode::ControlStore;

/// A parsed program file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramImage {
    /// Word address of the first program word.
    pub base_word: usize,
    /// Program words in load order.
    pub words: Vec<Word>,
}

impl ProgramImage {
    /// Byte address of the first program word.
    pub const fn origin(&self) -> Word {
        Word::new((self.base_word as u64) << 1)
    }

    /// Number of program words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the image has no words past its origin.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn read_text(kind: FileKind, path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SimError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a control-store image from disk.
///
/// # Errors
///
/// Returns [`SimError::Io`] when the file cannot be read, or any parse error
/// from [`ControlStore::parse`].
pub fn load_control_store(path: impl AsRef<Path>, syntax: &MicrocodeConfig) -> Result<ControlStore> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading control store");
    let text = read_text(FileKind::Microcode, path)?;
    ControlStore::parse(&text, syntax)
}

/// Parses a single hexadecimal word, with or without a `0x` or `x` prefix.
fn parse_hex(token: &str) -> Option<u16> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .or_else(|| token.strip_prefix('x'))
        .or_else(|| token.strip_prefix('X'))
        .unwrap_or(token);
    u16::from_str_radix(digits, 16).ok()
}

/// Parses program text.
///
/// Tokens are separated by any whitespace. The first token is the byte address of the
/// program; the rest are the words to load.
///
/// # Arguments
///
/// * `text` - File contents.
/// * `path` - Path used in error messages.
///
/// # Errors
///
/// * [`SimError::ProgramEmpty`] - no tokens at all.
/// * [`SimError::ProgramBadToken`] - a token that is not a 16-bit hex number.
/// * [`SimError::ProgramTooLarge`] - a word that would land past the end of memory.
pub fn parse_program(text: &str, path: &Path) -> Result<ProgramImage> {
    let mut tokens = text.split_whitespace().enumerate().map(|(index, token)| {
        parse_hex(token)
            .map(|word| Word::new(u64::from(word)))
            .ok_or_else(|| SimError::ProgramBadToken {
                path: path.to_path_buf(),
                index,
                token: token.to_string(),
            })
    });

    let origin = tokens.next().ok_or_else(|| SimError::ProgramEmpty {
        path: path.to_path_buf(),
    })??;
    let base_word = (origin >> 1).as_usize();

    let mut words = Vec::new();
    for word in tokens {
        let word = word?;
        let word_addr = base_word + words.len();
        if word_addr >= WORDS_IN_MEM {
            return Err(SimError::ProgramTooLarge {
                path: path.to_path_buf(),
                word_addr,
            });
        }
        words.push(word);
    }

    Ok(ProgramImage { base_word, words })
}

/// Writes a program image into memory.
///
/// The PC is set to the image's origin only if it is still 0, so the first of several
/// programs determines where execution starts.
///
/// # Errors
///
/// Returns [`SimError::InvalidMemoryAddress`] if a word falls outside memory.
pub fn install_program(cpu: &mut Cpu, image: &ProgramImage) -> Result<()> {
    for (offset, word) in image.words.iter().enumerate() {
        cpu.memory.write_word(image.base_word + offset, *word)?;
    }
    if cpu.state.pc.is_zero() {
        cpu.state.pc = image.origin();
    }
    Ok(())
}

/// Reads, parses, and installs a program file.
///
/// # Errors
///
/// Returns [`SimError::Io`] when the file cannot be read, or any error from
/// [`parse_program`] and [`install_program`].
pub fn load_program(cpu: &mut Cpu, path: impl AsRef<Path>) -> Result<ProgramImage> {
    let path = path.as_ref();
    let text = read_text(FileKind::Program, path)?;
    let image = parse_program(&text, path)?;
    install_program(cpu, &image)?;
    tracing::debug!(
        path = %path.display(),
        words = image.len(),
        origin = %format_args!("x{:04X}", image.origin()),
        "read program into memory"
    );
    Ok(image)
}
