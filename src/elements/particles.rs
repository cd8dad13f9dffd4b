use crate::{
    elements::{FrameCtx, LeafOutput, LeafRenderer},
    foundation::core::Rgba8,
    foundation::error::{CadenceError, CadenceResult},
    procedural::burst::{BurstParams, BurstState, burst_state},
    procedural::field::{FieldParams, FieldWindow, Motion, ParticleState, field_state},
};

/// Ambient particle field leaf.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Particles {
    /// Number of particles.
    pub count: u32,
    /// Attribute ranges.
    #[serde(default)]
    pub params: FieldParams,
    /// Per-particle animation window.
    pub window: FieldWindow,
    /// Motion model.
    #[serde(default)]
    pub motion: Motion,
    /// Particle colour.
    #[serde(default)]
    pub color: Rgba8,
}

/// Rendered particle field; positions in canvas pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticlesOutput {
    /// Particle colour.
    pub color: Rgba8,
    /// Visible particles in index order.
    pub particles: Vec<ParticleState>,
}

impl LeafRenderer for Particles {
    fn validate(&self) -> CadenceResult<()> {
        if self.count == 0 {
            return Err(CadenceError::validation("particles count must be > 0"));
        }
        self.params.validate()?;
        self.window.validate()
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> CadenceResult<Option<LeafOutput>> {
        let field = ctx.fields.get_or_generate(self.count, &self.params)?;
        let mut particles = field_state(&field, ctx.frame, &self.window, self.motion)?;
        if particles.is_empty() {
            return Ok(None);
        }
        for p in &mut particles {
            p.position = ctx.canvas.percent_to_px(p.position);
        }
        Ok(Some(LeafOutput::Particles(ParticlesOutput {
            color: self.color,
            particles,
        })))
    }
}

/// Seeded burst leaf.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Burst {
    /// Burst configuration.
    #[serde(flatten)]
    pub params: BurstParams,
    /// Particle colour.
    #[serde(default)]
    pub color: Rgba8,
}

/// Rendered burst; positions in canvas pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BurstOutput {
    /// Particle colour.
    pub color: Rgba8,
    /// Live particles.
    pub particles: Vec<BurstState>,
}

impl LeafRenderer for Burst {
    fn validate(&self) -> CadenceResult<()> {
        self.params.validate()
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> CadenceResult<Option<LeafOutput>> {
        let mut particles = burst_state(&self.params, ctx.frame)?;
        if particles.is_empty() {
            return Ok(None);
        }
        for p in &mut particles {
            p.position = ctx.canvas.percent_to_px(p.position);
        }
        Ok(Some(LeafOutput::Burst(BurstOutput {
            color: self.color,
            particles,
        })))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/elements/particles.rs"]
mod tests;
