//! Seeded procedural particle fields and bursts.

/// One-shot radial bursts.
pub mod burst;
/// Memoization of generated fields.
pub mod cache;
/// Index-seeded particle fields and their per-frame state.
pub mod field;
