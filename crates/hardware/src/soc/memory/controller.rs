//! Cache-port latency models.
//!
//! This module provides:
//! 1. **LatencyModel:** The seam deciding whether a cache port answers in a given cycle.
//! 2. **CycleModulo:** The default model, not ready on every `period`-th cycle.
//! 3. **AlwaysReady:** A model that never stalls.
//!
//! Any `FnMut(u64) -> bool` closure is also a latency model, which lets tests script
//! ready/not-ready sequences directly.

use std::fmt;

/// Decides whether a cache port is ready in a given cycle.
pub trait LatencyModel {
    /// Returns `true` when an access issued in `cycle` completes this cycle.
    ///
    /// # Arguments
    ///
    /// * `cycle` - Zero-based cycle count at the time of the access.
    fn is_ready(&mut self, cycle: u64) -> bool;
}

impl<F> LatencyModel for F
where
    F: FnMut(u64) -> bool,
{
    fn is_ready(&mut self, cycle: u64) -> bool {
        self(cycle)
    }
}

/// Misses once every `period` cycles, on multiples of `period`.
///
/// A period of 0 never misses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleModulo {
    period: u64,
}

impl CycleModulo {
    /// Creates a model missing on every multiple of `period`.
    ///
    /// # Arguments
    ///
    /// * `period` - Miss cadence in cycles; 0 disables misses.
    ///
    /// # Returns
    ///
    /// A new `CycleModulo`.
    pub const fn new(period: u64) -> Self {
        Self { period }
    }

    /// Returns the configured period.
    pub const fn period(&self) -> u64 {
        self.period
    }
}

impl LatencyModel for CycleModulo {
    fn is_ready(&mut self, cycle: u64) -> bool {
        self.period == 0 || cycle % self.period != 0
    }
}

/// A port that answers every access immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlwaysReady;

impl LatencyModel for AlwaysReady {
    fn is_ready(&mut self, _cycle: u64) -> bool {
        true
    }
}

/// Owned, type-erased latency model.
pub(crate) struct BoxedLatency(pub(crate) Box<dyn LatencyModel>);

impl fmt::Debug for BoxedLatency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LatencyModel")
    }
}
