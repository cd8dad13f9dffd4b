use crate::{
    animation::interpolate::{Interpolation, Lerp},
    animation::spring::SpringAnimation,
    foundation::core::Fps,
    foundation::error::{CadenceError, CadenceResult},
};

/// Explicit sampling context. There is no ambient "current frame".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleCtx {
    /// Node-local frame; negative before the owning node starts.
    pub frame: i64,
    /// Composition frame rate.
    pub fps: Fps,
}

impl SampleCtx {
    /// Context at `frame`.
    pub fn new(frame: i64, fps: Fps) -> Self {
        Self { frame, fps }
    }

    fn at(self, frame: i64) -> Self {
        Self { frame, ..self }
    }
}

/// A scalar animated value: a pure function of the node-local frame.
///
/// JSON is externally tagged (`{"constant": 1}`, `{"interpolate": {...}}`, `{"spring": {...}}`);
/// time-remapping expressions appear without a wrapper (`{"delay": {"inner": ..., "by": 5}}`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anim {
    /// Same value at every frame.
    Constant(f64),
    /// Frame mapped through an interpolation curve.
    Interpolate(Interpolation),
    /// Closed-form spring.
    Spring(SpringAnimation),
    /// Time remapping / blending over other animations.
    #[serde(untagged)]
    Expr(Expr),
}

impl Default for Anim {
    fn default() -> Self {
        Self::Constant(0.0)
    }
}

impl From<f64> for Anim {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<Interpolation> for Anim {
    fn from(value: Interpolation) -> Self {
        Self::Interpolate(value)
    }
}

impl From<SpringAnimation> for Anim {
    fn from(value: SpringAnimation) -> Self {
        Self::Spring(value)
    }
}

impl Anim {
    /// Constant animation.
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Return the value when this animation never changes.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Constant(v) => Some(*v),
            _ => None,
        }
    }

    /// Sample at `ctx.frame`.
    pub fn sample(&self, ctx: SampleCtx) -> CadenceResult<f64> {
        match self {
            Self::Constant(v) => Ok(*v),
            Self::Interpolate(curve) => Ok(curve.sample(ctx.frame as f64)),
            Self::Spring(spring) => spring.sample(ctx.frame, ctx.fps),
            Self::Expr(expr) => expr.sample(ctx),
        }
    }

    /// Check parameters without sampling.
    pub fn validate(&self) -> CadenceResult<()> {
        match self {
            Self::Constant(v) => {
                if !v.is_finite() {
                    return Err(CadenceError::animation("constant must be finite"));
                }
                Ok(())
            }
            // Validated on construction.
            Self::Interpolate(_) => Ok(()),
            Self::Spring(spring) => spring.validate(),
            Self::Expr(expr) => expr.validate(),
        }
    }
}

/// Loop behaviour of [`Expr::Loop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// `0, 1, .., p-1, 0, 1, ..`
    #[default]
    Repeat,
    /// `0, 1, .., p-1, p-2, .., 1, 0, 1, ..`
    PingPong,
}

/// Frame-remapping expressions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Shift the inner animation later by `by` frames.
    Delay {
        /// Remapped animation.
        inner: Box<Anim>,
        /// Shift in frames.
        by: i64,
    },
    /// Play the inner animation `factor` times faster (`factor > 0`).
    Speed {
        /// Remapped animation.
        inner: Box<Anim>,
        /// Speed multiplier.
        factor: f64,
    },
    /// Play the first `duration` frames backwards.
    Reverse {
        /// Remapped animation.
        inner: Box<Anim>,
        /// Length of the reversed window in frames.
        duration: u64,
    },
    /// Repeat the first `period` frames.
    Loop {
        /// Remapped animation.
        inner: Box<Anim>,
        /// Period in frames.
        period: u64,
        /// Repeat or ping-pong.
        #[serde(default)]
        mode: LoopMode,
    },
    /// Blend `a` toward `b` by `t` (clamped to `[0, 1]`).
    Mix {
        /// Value at `t = 0`.
        a: Box<Anim>,
        /// Value at `t = 1`.
        b: Box<Anim>,
        /// Blend factor.
        t: Box<Anim>,
    },
}

impl Expr {
    /// Check parameters recursively.
    pub fn validate(&self) -> CadenceResult<()> {
        match self {
            Self::Delay { inner, .. } => inner.validate(),
            Self::Speed { inner, factor } => {
                if !factor.is_finite() || *factor <= 0.0 {
                    return Err(CadenceError::animation("speed factor must be > 0"));
                }
                inner.validate()
            }
            Self::Reverse { inner, duration } => {
                if *duration == 0 {
                    return Err(CadenceError::animation("reverse duration must be > 0"));
                }
                inner.validate()
            }
            Self::Loop { inner, period, .. } => {
                if *period == 0 {
                    return Err(CadenceError::animation("loop period must be > 0"));
                }
                inner.validate()
            }
            Self::Mix { a, b, t } => {
                a.validate()?;
                b.validate()?;
                t.validate()
            }
        }
    }

    /// Sample with the remapped frame.
    pub fn sample(&self, ctx: SampleCtx) -> CadenceResult<f64> {
        self.validate_shallow()?;
        match self {
            Self::Delay { inner, by } => inner.sample(ctx.at(ctx.frame.saturating_sub(*by))),
            Self::Speed { inner, factor } => {
                let mapped = (ctx.frame as f64 * factor).floor() as i64;
                inner.sample(ctx.at(mapped))
            }
            Self::Reverse { inner, duration } => {
                let max = i64::try_from(*duration - 1).unwrap_or(i64::MAX);
                inner.sample(ctx.at(max - ctx.frame.clamp(0, max)))
            }
            Self::Loop {
                inner,
                period,
                mode,
            } => {
                let period = i64::try_from(*period).unwrap_or(i64::MAX);
                inner.sample(ctx.at(loop_frame(ctx.frame, period, *mode)))
            }
            Self::Mix { a, b, t } => {
                let tt = t.sample(ctx)?.clamp(0.0, 1.0);
                let av = a.sample(ctx)?;
                let bv = b.sample(ctx)?;
                Ok(f64::lerp(&av, &bv, tt))
            }
        }
    }

    fn validate_shallow(&self) -> CadenceResult<()> {
        match self {
            Self::Speed { factor, .. } if !factor.is_finite() || *factor <= 0.0 => {
                Err(CadenceError::animation("speed factor must be > 0"))
            }
            Self::Reverse { duration: 0, .. } => {
                Err(CadenceError::animation("reverse duration must be > 0"))
            }
            Self::Loop { period: 0, .. } => Err(CadenceError::animation("loop period must be > 0")),
            _ => Ok(()),
        }
    }
}

/// Fold `frame` into `[0, period)` for the given loop mode. `period` must be `> 0`.
pub(crate) fn loop_frame(frame: i64, period: i64, mode: LoopMode) -> i64 {
    match mode {
        LoopMode::Repeat => frame.rem_euclid(period),
        LoopMode::PingPong => {
            if period == 1 {
                return 0;
            }
            let cycle = 2 * (period - 1);
            let pos = frame.rem_euclid(cycle);
            if pos < period { pos } else { cycle - pos }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
