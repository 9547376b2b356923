//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! LC-3b pipeline. Each cycle they run in reverse order so that every stage sees
//! the signals its downstream neighbours already produced this cycle:
//! 1. **Store:** Selects the writeback value and computes the new condition codes.
//! 2. **Memory:** Accesses the data cache and resolves the next-PC select.
//! 3. **AGEX:** Computes addresses and ALU or shifter results.
//! 4. **Decode:** Reads the control store and registers, commits writeback, and checks dependencies.
//! 5. **Fetch:** Reads the instruction cache and decides whether PC and Decode load.

/// Address generation and execute stage implementation.
pub mod agex;

/// Decode and register-read stage implementation.
pub mod decode;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Store (writeback value) stage implementation.
pub mod store;

/// AGEX stage entry point (EX stage).
pub use agex::agex_stage;
/// Decode stage entry point (DE stage).
pub use decode::decode_stage;
/// Fetch stage entry point (FE stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::memory_stage;
/// Store stage entry point (SR stage).
pub use store::store_stage;
