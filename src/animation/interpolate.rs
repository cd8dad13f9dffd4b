use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8, Vec2},
    foundation::error::{CadenceError, CadenceResult},
    foundation::math::lerp_exact,
};

/// Behaviour outside the input domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Pin to the nearest boundary output.
    Clamp,
    /// Continue the trend of the boundary segment.
    #[default]
    Extend,
    /// Return the input unchanged.
    Identity,
}

/// Options shared by [`interpolate`] and [`Interpolation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolateOpts {
    /// Policy left of `input_range[0]`.
    #[serde(default)]
    pub extrapolate_left: Extrapolate,
    /// Policy right of the last input knot.
    #[serde(default)]
    pub extrapolate_right: Extrapolate,
    /// Easing applied to segment-local progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<Ease>,
}

impl InterpolateOpts {
    /// Clamp on both sides, no easing.
    pub fn clamped() -> Self {
        Self {
            extrapolate_left: Extrapolate::Clamp,
            extrapolate_right: Extrapolate::Clamp,
            ease: None,
        }
    }

    /// Return a copy with `ease` set.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }
}

/// Interpolation contract for value types blended by the interpolator.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t` (may leave `[0, 1]` when extrapolating).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp_exact(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(lerp_exact(a.x, b.x, t), lerp_exact(a.y, b.y, t))
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            lerp_exact(f64::from(a), f64::from(b), t)
                .round()
                .clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Map `input` through the piecewise-linear (optionally eased) curve
/// `input_range -> output_range`.
///
/// Fails with [`CadenceError::InvalidRange`] for malformed ranges and with
/// [`CadenceError::Validation`] for a non-finite input; never returns NaN for finite input.
pub fn interpolate(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    opts: &InterpolateOpts,
) -> CadenceResult<f64> {
    validate_ranges(input_range, output_range.len())?;
    if let Some(v) = output_range.iter().find(|v| !v.is_finite()) {
        return Err(CadenceError::invalid_range(format!(
            "output_range values must be finite (got {v})"
        )));
    }
    if !input.is_finite() {
        return Err(CadenceError::validation("interpolate input must be finite"));
    }
    let v = sample_validated(input, input_range, output_range, opts);
    if !v.is_finite() {
        return Err(non_finite_at(input));
    }
    Ok(v)
}

/// Colour variant of [`interpolate`]; channels are blended in straight alpha.
///
/// [`Extrapolate::Identity`] has no colour meaning and is rejected.
pub fn interpolate_color(
    input: f64,
    input_range: &[f64],
    colors: &[Rgba8],
    opts: &InterpolateOpts,
) -> CadenceResult<Rgba8> {
    validate_ranges(input_range, colors.len())?;
    if opts.extrapolate_left == Extrapolate::Identity
        || opts.extrapolate_right == Extrapolate::Identity
    {
        return Err(CadenceError::validation(
            "identity extrapolation is not supported for colours",
        ));
    }
    if !input.is_finite() {
        return Err(CadenceError::validation("interpolate input must be finite"));
    }
    match locate(input, input_range, opts) {
        Located::Passthrough(_) => Err(CadenceError::validation(
            "identity extrapolation is not supported for colours",
        )),
        Located::Segment { progress, .. } if !progress.is_finite() => Err(non_finite_at(input)),
        Located::Segment { index, progress } => Ok(Rgba8::lerp(
            &colors[index],
            &colors[index + 1],
            progress,
        )),
    }
}

fn non_finite_at(input: f64) -> CadenceError {
    CadenceError::invalid_range(format!(
        "curve is not finite at {input}; the easing overflows when extended this far"
    ))
}

/// Validated, serializable interpolation curve.
///
/// Ranges are checked once on construction (and on deserialize), so [`Interpolation::sample`]
/// is infallible for finite input.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "InterpolationDef")]
pub struct Interpolation {
    input_range: Vec<f64>,
    output_range: Vec<f64>,
    #[serde(flatten)]
    opts: InterpolateOpts,
}

#[derive(serde::Deserialize)]
struct InterpolationDef {
    input_range: Vec<f64>,
    output_range: Vec<f64>,
    #[serde(flatten)]
    opts: InterpolateOpts,
}

impl TryFrom<InterpolationDef> for Interpolation {
    type Error = CadenceError;

    fn try_from(def: InterpolationDef) -> CadenceResult<Self> {
        Self::new(def.input_range, def.output_range, def.opts)
    }
}

impl Interpolation {
    /// Validate and build an interpolation curve.
    pub fn new(
        input_range: Vec<f64>,
        output_range: Vec<f64>,
        opts: InterpolateOpts,
    ) -> CadenceResult<Self> {
        validate_ranges(&input_range, output_range.len())?;
        if output_range.iter().any(|v| !v.is_finite()) {
            return Err(CadenceError::invalid_range(
                "output_range values must be finite",
            ));
        }
        Ok(Self {
            input_range,
            output_range,
            opts,
        })
    }

    /// Input knots.
    pub fn input_range(&self) -> &[f64] {
        &self.input_range
    }

    /// Output knots.
    pub fn output_range(&self) -> &[f64] {
        &self.output_range
    }

    /// Extrapolation and easing options.
    pub fn opts(&self) -> &InterpolateOpts {
        &self.opts
    }

    /// Sample the curve. Non-finite input yields the first output value.
    ///
    /// Where an extended easing overflows, the nearest boundary output is returned instead.
    pub fn sample(&self, input: f64) -> f64 {
        if !input.is_finite() {
            return self.output_range[0];
        }
        let v = sample_validated(input, &self.input_range, &self.output_range, &self.opts);
        if v.is_finite() {
            return v;
        }
        if input <= self.input_range[0] {
            self.output_range[0]
        } else {
            self.output_range[self.output_range.len() - 1]
        }
    }
}

fn validate_ranges(input_range: &[f64], output_len: usize) -> CadenceResult<()> {
    if input_range.len() < 2 {
        return Err(CadenceError::invalid_range(
            "input_range must have at least 2 values",
        ));
    }
    if input_range.len() != output_len {
        return Err(CadenceError::invalid_range(format!(
            "input_range ({}) and output_range ({}) must have the same length",
            input_range.len(),
            output_len
        )));
    }
    if let Some(v) = input_range.iter().find(|v| !v.is_finite()) {
        return Err(CadenceError::invalid_range(format!(
            "input_range values must be finite (got {v})"
        )));
    }
    for (i, w) in input_range.windows(2).enumerate() {
        if w[1] == w[0] {
            return Err(CadenceError::invalid_range(format!(
                "input_range segment {i} has zero width at {}",
                w[0]
            )));
        }
        if w[1] < w[0] {
            return Err(CadenceError::invalid_range(format!(
                "input_range must be strictly increasing ({} then {})",
                w[0], w[1]
            )));
        }
    }
    Ok(())
}

enum Located {
    Passthrough(f64),
    Segment { index: usize, progress: f64 },
}

fn locate(input: f64, input_range: &[f64], opts: &InterpolateOpts) -> Located {
    let last = input_range.len() - 1;
    let index = (1..last)
        .find(|&i| input_range[i] >= input)
        .map_or(last - 1, |i| i - 1);

    let x0 = input_range[index];
    let x1 = input_range[index + 1];
    let mut x = input;

    if x < input_range[0] {
        match opts.extrapolate_left {
            Extrapolate::Identity => return Located::Passthrough(input),
            Extrapolate::Clamp => x = input_range[0],
            Extrapolate::Extend => {}
        }
    }
    if x > input_range[last] {
        match opts.extrapolate_right {
            Extrapolate::Identity => return Located::Passthrough(input),
            Extrapolate::Clamp => x = input_range[last],
            Extrapolate::Extend => {}
        }
    }

    let raw = (x - x0) / (x1 - x0);
    let progress = match opts.ease {
        Some(ease) => ease.apply(raw),
        None => raw,
    };
    Located::Segment { index, progress }
}

fn sample_validated(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    opts: &InterpolateOpts,
) -> f64 {
    match locate(input, input_range, opts) {
        Located::Passthrough(v) => v,
        Located::Segment { index, progress } => {
            let y0 = output_range[index];
            let y1 = output_range[index + 1];
            if y0 == y1 {
                return y0;
            }
            lerp_exact(y0, y1, progress)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
