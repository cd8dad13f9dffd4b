//! Shared value types, the error taxonomy and deterministic hashing helpers.

/// Frames, frame rates, canvas, colours and transforms.
pub mod core;
/// [`CadenceError`](error::CadenceError) and [`CadenceResult`](error::CadenceResult).
pub mod error;
pub(crate) mod math;
