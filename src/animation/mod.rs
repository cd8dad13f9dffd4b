//! Frame-to-parameter primitives: easing, interpolation, springs and composable animated values.
//!
//! Everything here is a pure function of its inputs; there is no clock and no accumulated state.

/// Declarative animated values and frame-remapping expressions.
pub mod anim;
/// Easing curves.
pub mod ease;
/// Piecewise-linear interpolation with extrapolation policies.
pub mod interpolate;
/// Builders over [`anim::Anim`].
pub mod ops;
/// Closed-form damped springs.
pub mod spring;
/// Frame/second conversion and progress helpers.
pub mod timing;
