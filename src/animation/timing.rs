//! Frame/second conversions and small timing helpers used by scene authors.

use crate::{
    animation::ease::Ease,
    foundation::core::Fps,
    foundation::error::{CadenceError, CadenceResult},
};

/// Seconds to the nearest whole frame.
pub fn seconds_to_frames(secs: f64, fps: Fps) -> CadenceResult<u64> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(CadenceError::validation(format!(
            "seconds must be finite and >= 0 (got {secs})"
        )));
    }
    Ok((secs * fps.as_f64()).round() as u64)
}

/// Frames to seconds.
pub fn frames_to_seconds(frames: i64, fps: Fps) -> f64 {
    fps.frames_to_secs(frames as f64)
}

/// Start offset of the `index`-th item in a stagger of `step` frames.
pub fn stagger_offset(index: usize, step: u64) -> i64 {
    let offset = (index as u64).saturating_mul(step);
    i64::try_from(offset).unwrap_or(i64::MAX)
}

/// Linear progress of `frame` through `[start, start + duration]`, clamped to `[0, 1]` and eased.
pub fn progress(frame: i64, start: i64, duration: u64, ease: Ease) -> f64 {
    if duration == 0 {
        return if frame >= start { 1.0 } else { 0.0 };
    }
    let raw = (frame.saturating_sub(start)) as f64 / duration as f64;
    ease.apply(raw.clamp(0.0, 1.0))
}

/// Number of items revealed after `frames` at `per_frame` items per frame, capped at `total`.
pub fn revealed_count(frames: i64, per_frame: f64, total: usize) -> usize {
    if frames <= 0 || per_frame <= 0.0 || !per_frame.is_finite() {
        return 0;
    }
    let n = (frames as f64 * per_frame).floor();
    if n >= total as f64 { total } else { n as usize }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
