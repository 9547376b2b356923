/// Control store parsing and field decoding.
pub mod microcode;

/// Pipeline hazards, stages, history, and whole programs.
pub mod pipeline;

/// ALU and shifter tests.
pub mod units;
