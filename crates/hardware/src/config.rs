//! Configuration system for the LC-3b pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline constants (miss periods, history depth).
//! 2. **Structures:** Hierarchical config for general, memory, and microcode settings.
//! 3. **Loading:** Deserialization from a JSON document or file.
//!
//! Every field has a default, so `{}` is a valid document and the CLI runs with
//! `Config::default()` unless a file is given.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{DCACHE_MISS_PERIOD, ICACHE_MISS_PERIOD};
use crate::common::error::{FileKind, Result, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of retired instruction records kept for the timing diagram.
    pub const HISTORY_LIMIT: usize = 1024;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use lc3b_pipe_core::config::Config;
///
/// let config = Config::default();
/// assert!(!config.general.trace_instructions);
/// assert_eq!(config.memory.icache_miss_period, 13);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use lc3b_pipe_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "max_cycles": 5000 },
///     "memory": { "icache_miss_period": 0, "dcache_miss_period": 4 },
///     "microcode": { "allow_comments": true }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.max_cycles, Some(5000));
/// assert_eq!(config.memory.dcache_miss_period, 4);
/// assert!(config.microcode.allow_comments);
/// assert!(!config.microcode.ignore_whitespace);
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory latency model
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Microcode file syntax
    #[serde(default)]
    pub microcode: MicrocodeConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] when the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] when the file cannot be read and
    /// [`SimError::Config`] when it is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            kind: FileKind::Config,
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Emit a `trace`-level event per stage per cycle.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Upper bound on cycles executed by one `run_to_halt` call.
    #[serde(default)]
    pub max_cycles: Option<u64>,

    /// Retired records kept for the timing diagram before the oldest are dropped.
    #[serde(default = "GeneralConfig::default_history_limit")]
    pub history_limit: usize,
}

impl GeneralConfig {
    fn default_history_limit() -> usize {
        defaults::HISTORY_LIMIT
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: None,
            history_limit: defaults::HISTORY_LIMIT,
        }
    }
}

/// Cache-port latency configuration.
///
/// Each port misses on every cycle that is a multiple of its period.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Instruction-port miss period; 0 disables misses.
    #[serde(default = "MemoryConfig::default_icache_miss_period")]
    pub icache_miss_period: u64,

    /// Data-port miss period; 0 disables misses.
    #[serde(default = "MemoryConfig::default_dcache_miss_period")]
    pub dcache_miss_period: u64,
}

impl MemoryConfig {
    fn default_icache_miss_period() -> u64 {
        ICACHE_MISS_PERIOD
    }

    fn default_dcache_miss_period() -> u64 {
        DCACHE_MISS_PERIOD
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            icache_miss_period: ICACHE_MISS_PERIOD,
            dcache_miss_period: DCACHE_MISS_PERIOD,
        }
    }
}

/// Microcode file syntax options.
///
/// The strict default expects exactly one row of `0`/`1` characters per line.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct MicrocodeConfig {
    /// Treat `#` as the start of a comment and skip blank lines.
    #[serde(default)]
    pub allow_comments: bool,

    /// Skip spaces and tabs inside a row.
    #[serde(default)]
    pub ignore_whitespace: bool,
}
