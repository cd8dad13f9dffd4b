use crate::{
    animation::ease::Ease,
    animation::interpolate::{InterpolateOpts, interpolate},
    foundation::core::Vec2,
    foundation::error::{CadenceError, CadenceResult},
    foundation::math::{lerp_exact, unit},
};

/// Golden angle in degrees; consecutive multiples never line up.
pub const GOLDEN_ANGLE_DEG: f64 = 137.507_764_050_037_85;

/// Upward drift in canvas percent per frame per unit speed.
pub const UP_RATE: f64 = 0.3;
/// Radial drift in canvas percent per frame per unit speed.
pub const RADIAL_RATE: f64 = 0.25;

/// Closed interval an attribute is remapped into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Value at `unit == 0`.
    pub min: f64,
    /// Value at `unit == 1`.
    pub max: f64,
}

impl Span {
    /// Build a span.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn at(self, u: f64) -> f64 {
        lerp_exact(self.min, self.max, u)
    }

    fn validate(self, name: &str) -> CadenceResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CadenceError::validation(format!(
                "field {name} range must be finite"
            )));
        }
        if self.min > self.max {
            return Err(CadenceError::validation(format!(
                "field {name} range is inverted ({} > {})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Parameters of a procedural particle field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Per-index seed multiplier `K` in `s = i * K`.
    pub seed_multiplier: f64,
    /// Horizontal position, percent of canvas width.
    pub x: Span,
    /// Vertical position, percent of canvas height.
    pub y: Span,
    /// Size in pixels.
    pub size: Span,
    /// Motion speed multiplier.
    pub speed: Span,
    /// Peak opacity.
    pub opacity: Span,
    /// Upper bound of the start delay in frames.
    pub max_delay: f64,
    /// Heading in degrees.
    pub angle: Span,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            seed_multiplier: GOLDEN_ANGLE_DEG,
            x: Span::new(0.0, 100.0),
            y: Span::new(0.0, 100.0),
            size: Span::new(2.0, 6.0),
            speed: Span::new(0.5, 2.0),
            opacity: Span::new(0.2, 0.8),
            max_delay: 30.0,
            angle: Span::new(0.0, 360.0),
        }
    }
}

impl FieldParams {
    /// Reject non-finite values and inverted ranges.
    pub fn validate(&self) -> CadenceResult<()> {
        if !self.seed_multiplier.is_finite() {
            return Err(CadenceError::validation(
                "field seed_multiplier must be finite",
            ));
        }
        if !self.max_delay.is_finite() || self.max_delay < 0.0 {
            return Err(CadenceError::validation(
                "field max_delay must be finite and >= 0",
            ));
        }
        for (name, span) in [
            ("x", self.x),
            ("y", self.y),
            ("size", self.size),
            ("speed", self.speed),
            ("opacity", self.opacity),
            ("angle", self.angle),
        ] {
            span.validate(name)?;
        }
        Ok(())
    }

    /// Stable bit-level key for memoization.
    pub(crate) fn key_bits(&self) -> [u64; 14] {
        [
            self.seed_multiplier.to_bits(),
            self.x.min.to_bits(),
            self.x.max.to_bits(),
            self.y.min.to_bits(),
            self.y.max.to_bits(),
            self.size.min.to_bits(),
            self.size.max.to_bits(),
            self.speed.min.to_bits(),
            self.speed.max.to_bits(),
            self.opacity.min.to_bits(),
            self.opacity.max.to_bits(),
            self.max_delay.to_bits(),
            self.angle.min.to_bits(),
            self.angle.max.to_bits(),
        ]
    }
}

/// Attributes of one particle, fixed for the lifetime of the field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Particle {
    /// Index in the field.
    pub id: u32,
    /// Start x, percent.
    pub x: f64,
    /// Start y, percent.
    pub y: f64,
    /// Size in pixels.
    pub size: f64,
    /// Speed multiplier.
    pub speed: f64,
    /// Peak opacity.
    pub opacity: f64,
    /// Start delay in frames.
    pub delay: f64,
    /// Heading in degrees.
    pub angle: f64,
}

/// Derive particle `index` from `params`. Pure; `params` is assumed valid.
pub fn particle_at(index: u32, params: &FieldParams) -> Particle {
    let s = f64::from(index) * params.seed_multiplier;
    Particle {
        id: index,
        x: params.x.at(unit(s.sin())),
        y: params.y.at(unit((2.0 * s).cos())),
        size: params.size.at(unit((3.0 * s).sin())),
        speed: params.speed.at(unit((4.0 * s).cos())),
        opacity: params.opacity.at(unit((5.0 * s).sin())),
        delay: params.max_delay * unit((6.0 * s).cos()),
        angle: params.angle.at(unit((7.0 * s).sin())),
    }
}

/// Generate `count` particles. `generate_field(n + 1, p)[..n] == generate_field(n, p)`.
pub fn generate_field(count: u32, params: &FieldParams) -> CadenceResult<Vec<Particle>> {
    params.validate()?;
    Ok((0..count).map(|i| particle_at(i, params)).collect())
}

/// Animation window shared by every particle in a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldWindow {
    /// Node-local frame the field starts at.
    #[serde(default)]
    pub start: i64,
    /// Per-particle visible duration in frames.
    pub duration: u64,
    /// Fade-in and fade-out length in frames.
    #[serde(default = "default_fade")]
    pub fade: u64,
}

fn default_fade() -> u64 {
    10
}

impl FieldWindow {
    /// Require `fade >= 1` and `duration > 2 * fade`.
    pub fn validate(&self) -> CadenceResult<()> {
        if self.fade == 0 {
            return Err(CadenceError::invalid_range("field fade must be >= 1"));
        }
        if self.duration <= self.fade.saturating_mul(2) {
            return Err(CadenceError::invalid_range(format!(
                "field duration ({}) must exceed twice the fade ({})",
                self.duration, self.fade
            )));
        }
        Ok(())
    }
}

/// Closed-form particle motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Drift upward at `speed * UP_RATE`.
    #[default]
    Up,
    /// Drift outward along `angle` at `speed * RADIAL_RATE`.
    Radial,
    /// Ease (out-cubic) toward the canvas centre over the window.
    Converge,
}

/// Where and how a particle is drawn at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleState {
    /// Particle index.
    pub id: u32,
    /// Position in canvas percent.
    pub position: Vec2,
    /// Size in pixels.
    pub size: f64,
    /// Opacity after the fade envelope.
    pub opacity: f64,
}

/// Particle state at a node-local `frame`, or `None` when it is not drawn.
pub fn particle_state(
    particle: &Particle,
    frame: i64,
    window: &FieldWindow,
    motion: Motion,
) -> CadenceResult<Option<ParticleState>> {
    window.validate()?;
    let relative = frame.saturating_sub(window.start) as f64 - particle.delay;
    let duration = window.duration as f64;
    if relative < 0.0 || relative >= duration {
        return Ok(None);
    }

    let origin = Vec2::new(particle.x, particle.y);
    let position = match motion {
        Motion::Up => Vec2::new(origin.x, origin.y - relative * particle.speed * UP_RATE),
        Motion::Radial => {
            let dist = relative * particle.speed * RADIAL_RATE;
            let (sin, cos) = particle.angle.to_radians().sin_cos();
            origin + Vec2::new(cos * dist, sin * dist)
        }
        Motion::Converge => {
            let p = Ease::OutCubic.apply(relative / duration);
            origin.lerp(Vec2::new(50.0, 50.0), p)
        }
    };

    let fade = window.fade as f64;
    let opacity = interpolate(
        relative,
        &[0.0, fade, duration - fade, duration],
        &[0.0, particle.opacity, particle.opacity, 0.0],
        &InterpolateOpts::clamped(),
    )?;

    Ok(Some(ParticleState {
        id: particle.id,
        position,
        size: particle.size,
        opacity,
    }))
}

/// States of every visible particle, in index order.
pub fn field_state(
    particles: &[Particle],
    frame: i64,
    window: &FieldWindow,
    motion: Motion,
) -> CadenceResult<Vec<ParticleState>> {
    let mut out = Vec::with_capacity(particles.len());
    for p in particles {
        if let Some(state) = particle_state(p, frame, window, motion)? {
            out.push(state);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/procedural/field.rs"]
mod tests;
