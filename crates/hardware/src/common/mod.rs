//! Common utilities and types used throughout the LC-3b pipeline simulator.
//!
//! This module provides the building blocks shared by every other component. It includes:
//! 1. **Bit Containers:** Fixed-width values with checked sub-ranges and wrapping arithmetic.
//! 2. **Constants:** Memory, register-file, and control-store dimensions.
//! 3. **Error Handling:** Fatal configuration errors and bit-container failures.
//! 4. **Register Management:** The eight-entry general-purpose register file.

/// Fixed-width bit containers.
pub mod bits;

/// Machine-wide constants.
pub mod constants;

/// Error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use bits::{Bit, Bits, Bits2, Bits3, Bits6, Bits8, ToNative, Word};
pub use error::{BitsError, FileKind, Result, SimError};
pub use reg::RegisterFile;
