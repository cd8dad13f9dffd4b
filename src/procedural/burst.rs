//! One-shot radial bursts.
//!
//! Each particle is seeded from `(origin, start_frame, seed, index)`, so a burst looks the same
//! in every render and on every worker.

use crate::{
    foundation::core::Vec2,
    foundation::error::{CadenceError, CadenceResult},
    foundation::math::{Fnv1a64, Rng64, lerp_exact},
    procedural::field::Span,
};

/// Static configuration of a burst.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BurstParams {
    /// Emission point in canvas percent.
    pub origin: Vec2,
    /// Node-local frame the burst fires at.
    #[serde(default)]
    pub start_frame: i64,
    /// Number of particles.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Frames each particle lives.
    #[serde(default = "default_lifetime")]
    pub lifetime: u64,
    /// Distance reached by the fastest particle at the end of its life, canvas percent.
    #[serde(default = "default_max_distance")]
    pub max_distance: f64,
    /// Particle size range in pixels.
    #[serde(default = "default_size")]
    pub size: Span,
    /// Extra entropy to tell apart bursts sharing origin and start.
    #[serde(default)]
    pub seed: u64,
}

fn default_count() -> u32 {
    12
}

fn default_lifetime() -> u64 {
    30
}

fn default_max_distance() -> f64 {
    20.0
}

fn default_size() -> Span {
    Span::new(3.0, 8.0)
}

impl BurstParams {
    /// Burst at `origin` firing at `start_frame`, other fields default.
    pub fn new(origin: Vec2, start_frame: i64) -> Self {
        Self {
            origin,
            start_frame,
            count: default_count(),
            lifetime: default_lifetime(),
            max_distance: default_max_distance(),
            size: default_size(),
            seed: 0,
        }
    }

    /// Reject empty lifetimes and non-finite geometry.
    pub fn validate(&self) -> CadenceResult<()> {
        if self.lifetime == 0 {
            return Err(CadenceError::validation("burst lifetime must be > 0"));
        }
        if !self.origin.x.is_finite() || !self.origin.y.is_finite() {
            return Err(CadenceError::validation("burst origin must be finite"));
        }
        if !self.max_distance.is_finite() || self.max_distance < 0.0 {
            return Err(CadenceError::validation(
                "burst max_distance must be finite and >= 0",
            ));
        }
        if !self.size.min.is_finite() || !self.size.max.is_finite() || self.size.min > self.size.max
        {
            return Err(CadenceError::validation("burst size range is invalid"));
        }
        Ok(())
    }

    fn particle_rng(&self, index: u32) -> Rng64 {
        let mut h = Fnv1a64::new(self.seed);
        h.write_f64(self.origin.x);
        h.write_f64(self.origin.y);
        h.write_i64(self.start_frame);
        h.write_u64(u64::from(index));
        Rng64::new(h.finish())
    }
}

/// Frame-independent attributes of one burst particle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BurstParticle {
    /// Index in the burst.
    pub id: u32,
    /// Heading in degrees.
    pub angle: f64,
    /// Fraction of `max_distance` covered over the lifetime, in `[0.5, 1)`.
    pub reach: f64,
    /// Size in pixels.
    pub size: f64,
}

/// Seeded attributes of particle `index`.
pub fn burst_particle(params: &BurstParams, index: u32) -> BurstParticle {
    let mut rng = params.particle_rng(index);
    let angle = rng.next_f64_01() * 360.0;
    let reach = 0.5 + 0.5 * rng.next_f64_01();
    let size = lerp_exact(params.size.min, params.size.max, rng.next_f64_01());
    BurstParticle {
        id: index,
        angle,
        reach,
        size,
    }
}

/// One burst particle at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BurstState {
    /// Particle index.
    pub id: u32,
    /// Position in canvas percent.
    pub position: Vec2,
    /// Size in pixels before `scale`.
    pub size: f64,
    /// Linear `1 -> 0` over the lifetime.
    pub opacity: f64,
    /// Linear `1 -> 0.5` over the lifetime.
    pub scale: f64,
}

/// Visible burst particles at node-local `frame`; empty outside the lifetime window.
pub fn burst_state(params: &BurstParams, frame: i64) -> CadenceResult<Vec<BurstState>> {
    params.validate()?;
    let elapsed = frame.saturating_sub(params.start_frame);
    let lifetime = params.lifetime as f64;
    if elapsed < 0 || elapsed as f64 >= lifetime {
        return Ok(Vec::new());
    }

    let t = elapsed as f64 / lifetime;
    let opacity = lerp_exact(1.0, 0.0, t);
    let scale = lerp_exact(1.0, 0.5, t);
    let out = (0..params.count)
        .map(|i| {
            let p = burst_particle(params, i);
            let speed = p.reach * params.max_distance / lifetime;
            let dist = elapsed as f64 * speed;
            let (sin, cos) = p.angle.to_radians().sin_cos();
            BurstState {
                id: p.id,
                position: params.origin + Vec2::new(cos * dist, sin * dist),
                size: p.size,
                opacity,
                scale,
            }
        })
        .collect();
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/procedural/burst.rs"]
mod tests;
