//! # Unit Components
//!
//! This module serves as the central hub for the per-component tests. It organizes
//! the fundamental building blocks, the pipeline, the memory ports, and the simulator
//! driver that sits on top of them.


/// Tests for JSON configuration loading and defaults.
pub mod config;

/// Core tests: control store, execution units, hazards, history, and whole programs.
pub mod core;
