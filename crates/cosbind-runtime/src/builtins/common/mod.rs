//! Marshaling helpers shared across builtin implementations.
pub mod scalar;
