//! LC-3b pipelined simulator library.
//!
//! This crate implements a cycle-accurate, microcoded, five-stage LC-3b pipeline with the following:
//! 1. **Core:** Fetch, Decode, AGEX, Memory and Store stages with stall-only hazard handling.
//! 2. **Microcode:** A 64-row control store loaded from a text image.
//! 3. **Memory:** Byte-addressed main memory behind instruction and data ports with
//!    pluggable latency models.
//! 4. **ISA:** Instruction field extraction and a disassembler.
//! 5. **Simulation:** Loader, run control, dumps, and statistics collection.

/// Common types and constants (bit containers, registers, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (pipeline, arch state, microcode, execution units).
pub mod core;
/// Instruction set (opcodes, fields, disassembler).
pub mod isa;
/// Simulator, loader, and dumps.
pub mod sim;
/// Main memory and cache-port latency models.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds architectural state, memory, and the control store.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new` or `Simulator::initialize`.
pub use crate::sim::Simulator;
