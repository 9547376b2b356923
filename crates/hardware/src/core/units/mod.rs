//! Execution units and functional components.
//!
//! This module contains the combinational units of the AGEX stage: the ALU and
//! the shifter.

/// Arithmetic Logic Unit and shifter.
pub mod alu;
