//! Closed-form damped harmonic oscillator.
//!
//! The spring is released from rest at position 0 toward target 1 (displacement `x0 = -1`) and is
//! evaluated analytically at `t = frame / fps` seconds, so any frame costs the same.

use crate::{
    foundation::core::Fps,
    foundation::error::{CadenceError, CadenceResult},
    foundation::math::lerp_exact,
};

/// Default settle threshold for [`measure_spring`].
pub const DEFAULT_SETTLE_THRESHOLD: f64 = 0.005;

const CRITICAL_EPSILON: f64 = 1e-9;
const MAX_MEASURE_FRAMES: u64 = 1_000_000;

/// Physical constants of a spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Damping coefficient, `> 0`.
    pub damping: f64,
    /// Spring stiffness, `> 0`.
    pub stiffness: f64,
    /// Mass, `> 0`.
    pub mass: f64,
    /// Initial velocity in progress units per second, positive toward the target.
    pub initial_velocity: f64,
    /// Cap progress at 1 instead of overshooting.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
            initial_velocity: 0.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Reject non-positive or non-finite constants.
    pub fn validate(&self) -> CadenceResult<()> {
        for (name, value) in [
            ("mass", self.mass),
            ("stiffness", self.stiffness),
            ("damping", self.damping),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CadenceError::invalid_spring(format!(
                    "{name} must be finite and > 0 (got {value})"
                )));
            }
        }
        if !self.initial_velocity.is_finite() {
            return Err(CadenceError::invalid_spring(
                "initial_velocity must be finite",
            ));
        }
        Ok(())
    }

    /// Damping ratio `zeta = c / (2 sqrt(k m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    fn solution(&self) -> Solution {
        let omega0 = (self.stiffness / self.mass).sqrt();
        let zeta = self.damping_ratio();
        let x0 = -1.0;
        let v0 = self.initial_velocity;

        if (zeta - 1.0).abs() < CRITICAL_EPSILON {
            Solution::Critical {
                omega0,
                x0,
                b: v0 + omega0 * x0,
            }
        } else if zeta < 1.0 {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            Solution::Under {
                decay: zeta * omega0,
                omega_d,
                x0,
                b: (v0 + zeta * omega0 * x0) / omega_d,
            }
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            // zeta - root == 1 / (zeta + root), without the cancellation at large zeta.
            let r1 = -omega0 / (zeta + root);
            let r2 = -omega0 * (zeta + root);
            let c1 = (v0 - r2 * x0) / (r1 - r2);
            Solution::Over {
                r1,
                r2,
                c1,
                c2: x0 - c1,
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Solution {
    Under {
        decay: f64,
        omega_d: f64,
        x0: f64,
        b: f64,
    },
    Critical {
        omega0: f64,
        x0: f64,
        b: f64,
    },
    Over {
        r1: f64,
        r2: f64,
        c1: f64,
        c2: f64,
    },
}

impl Solution {
    /// Signed displacement from the target at `t` seconds.
    fn displacement(self, t: f64) -> f64 {
        match self {
            Self::Under {
                decay,
                omega_d,
                x0,
                b,
            } => (-decay * t).exp() * (x0 * (omega_d * t).cos() + b * (omega_d * t).sin()),
            Self::Critical { omega0, x0, b } => (-omega0 * t).exp() * (x0 + b * t),
            Self::Over { r1, r2, c1, c2 } => c1 * (r1 * t).exp() + c2 * (r2 * t).exp(),
        }
    }

    /// Upper bound of `|displacement|` at `t` seconds.
    fn envelope(self, t: f64) -> f64 {
        match self {
            Self::Under { decay, x0, b, .. } => (-decay * t).exp() * (x0 * x0 + b * b).sqrt(),
            Self::Critical { omega0, x0, b } => (-omega0 * t).exp() * (x0.abs() + b.abs() * t),
            Self::Over { r1, r2, c1, c2 } => {
                c1.abs() * (r1 * t).exp() + c2.abs() * (r2 * t).exp()
            }
        }
    }
}

fn validate_fps(fps: Fps) -> CadenceResult<()> {
    if !fps.is_valid() {
        return Err(CadenceError::invalid_spring(format!(
            "fps must be > 0 (got {}/{})",
            fps.num, fps.den
        )));
    }
    Ok(())
}

/// Spring progress at `relative_frame`: 0 at (and before) frame 0, converging to 1.
pub fn spring(relative_frame: f64, fps: Fps, config: &SpringConfig) -> CadenceResult<f64> {
    config.validate()?;
    validate_fps(fps)?;
    if relative_frame.is_nan() {
        return Err(CadenceError::validation("spring frame must not be NaN"));
    }
    if relative_frame <= 0.0 {
        return Ok(0.0);
    }
    if relative_frame.is_infinite() {
        return Ok(1.0);
    }

    let t = fps.frames_to_secs(relative_frame);
    let x = config.solution().displacement(t);
    let progress = 1.0 + x;
    if config.overshoot_clamping {
        Ok(progress.min(1.0))
    } else {
        Ok(progress)
    }
}

/// First frame from which the spring stays within `threshold` of its target.
pub fn measure_spring(fps: Fps, config: &SpringConfig, threshold: f64) -> CadenceResult<u64> {
    config.validate()?;
    validate_fps(fps)?;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(CadenceError::animation(
            "settle threshold must be finite and > 0",
        ));
    }

    // Starting from |x0| = 1 the envelope either decays monotonically or rises once before
    // decaying, so past frame 0 "settled" flips exactly once: bracket it, then bisect.
    let solution = config.solution();
    let settled = |frame: u64| solution.envelope(fps.frames_to_secs(frame as f64)) < threshold;
    if settled(0) {
        return Ok(0);
    }

    let last = MAX_MEASURE_FRAMES - 1;
    let (mut lo, mut hi) = (0u64, 1u64);
    while !settled(hi) {
        if hi == last {
            return Err(CadenceError::animation(format!(
                "spring does not settle within {MAX_MEASURE_FRAMES} frames"
            )));
        }
        lo = hi;
        hi = hi.saturating_mul(2).min(last);
    }
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if settled(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(hi)
}

/// A spring mapped onto an output range, with optional delay and duration stretching.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringAnimation {
    /// Physical constants.
    #[serde(default)]
    pub config: SpringConfig,
    /// Value at rest before the spring starts.
    #[serde(default)]
    pub from: f64,
    /// Target value.
    #[serde(default = "default_to")]
    pub to: f64,
    /// Frames to wait before releasing the spring.
    #[serde(default)]
    pub delay: i64,
    /// Stretch time so the spring settles exactly at this frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_frames: Option<u64>,
}

fn default_to() -> f64 {
    1.0
}

impl Default for SpringAnimation {
    fn default() -> Self {
        Self {
            config: SpringConfig::default(),
            from: 0.0,
            to: 1.0,
            delay: 0,
            duration_in_frames: None,
        }
    }
}

impl SpringAnimation {
    /// Validate constants and duration.
    pub fn validate(&self) -> CadenceResult<()> {
        self.config.validate()?;
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(CadenceError::animation("spring from/to must be finite"));
        }
        if self.duration_in_frames == Some(0) {
            return Err(CadenceError::animation(
                "spring duration_in_frames must be > 0",
            ));
        }
        Ok(())
    }

    /// Value at a node-local frame.
    pub fn sample(&self, frame: i64, fps: Fps) -> CadenceResult<f64> {
        self.validate()?;
        let mut rel = frame.saturating_sub(self.delay) as f64;
        if let Some(duration) = self.duration_in_frames {
            let natural = measure_spring(fps, &self.config, DEFAULT_SETTLE_THRESHOLD)?.max(1);
            rel = rel * natural as f64 / duration as f64;
        }
        let progress = spring(rel, fps, &self.config)?;
        Ok(lerp_exact(self.from, self.to, progress))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
