//! Mock implementations of simulator seams.

/// Mock cache-port latency model.
pub mod latency;
