//! Mock implementations for running without the real training stack.

#[cfg(feature = "mock-trainer")]
pub mod trainer;
