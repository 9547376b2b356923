

/// Small programs run through the whole pipeline.
pub mod programs;
