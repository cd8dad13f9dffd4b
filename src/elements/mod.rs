//! Leaf renderers: turn a node-local frame into pure render parameters.

use crate::{
    animation::anim::{Anim, SampleCtx},
    assets::AssetResolver,
    foundation::core::{Canvas, Fps, Transform2D, Vec2},
    foundation::error::CadenceResult,
    procedural::cache::FieldCache,
};

/// Image leaves.
pub mod media;
/// Particle field and burst leaves.
pub mod particles;
/// Vector shape leaves.
pub mod shape;
/// Text reveal and counter leaves.
pub mod text;

pub use media::{Fit, Image, ImageOutput};
pub use particles::{Burst, BurstOutput, Particles, ParticlesOutput};
pub use shape::{ColorRamp, Geometry, Shape, ShapeOutput, Stroke};
pub use text::{Counter, RevealStyle, TextOutput, TextReveal};

/// Everything a leaf may read while rendering one frame.
#[derive(Clone, Copy)]
pub struct FrameCtx<'a> {
    /// Node-local frame (`>= 0` while the leaf is active).
    pub frame: i64,
    /// Duration of the owning node, if bounded.
    pub duration: Option<u64>,
    /// Composition frame rate.
    pub fps: Fps,
    /// Composition canvas.
    pub canvas: Canvas,
    /// External static-asset resolver.
    pub assets: &'a dyn AssetResolver,
    /// Shared particle-field memo.
    pub fields: &'a FieldCache,
}

impl FrameCtx<'_> {
    /// Sampling context for animated values.
    pub fn sample_ctx(&self) -> SampleCtx {
        SampleCtx::new(self.frame, self.fps)
    }
}

impl std::fmt::Debug for FrameCtx<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCtx")
            .field("frame", &self.frame)
            .field("duration", &self.duration)
            .field("fps", &self.fps)
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

/// Contract implemented by every leaf element.
pub trait LeafRenderer {
    /// Check static configuration.
    fn validate(&self) -> CadenceResult<()>;

    /// Static files this leaf references.
    fn asset_refs(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Output at `ctx.frame`, or `None` when nothing is drawn.
    fn render(&self, ctx: &FrameCtx<'_>) -> CadenceResult<Option<LeafOutput>>;
}

/// Closed set of leaf elements.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Progressive text reveal.
    TextReveal(TextReveal),
    /// Animated number.
    Counter(Counter),
    /// Rectangle, circle or path.
    Shape(Shape),
    /// Static image.
    Image(Image),
    /// Seeded ambient particles.
    Particles(Particles),
    /// Seeded one-shot burst.
    Burst(Burst),
}

impl Element {
    fn as_renderer(&self) -> &dyn LeafRenderer {
        match self {
            Self::TextReveal(e) => e,
            Self::Counter(e) => e,
            Self::Shape(e) => e,
            Self::Image(e) => e,
            Self::Particles(e) => e,
            Self::Burst(e) => e,
        }
    }
}

impl LeafRenderer for Element {
    fn validate(&self) -> CadenceResult<()> {
        self.as_renderer().validate()
    }

    fn asset_refs(&self) -> Vec<&str> {
        self.as_renderer().asset_refs()
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> CadenceResult<Option<LeafOutput>> {
        self.as_renderer().render(ctx)
    }
}

/// Rendered content of one leaf.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeafOutput {
    /// Text run.
    Text(TextOutput),
    /// Vector shape.
    Shape(ShapeOutput),
    /// Image reference.
    Image(ImageOutput),
    /// Particle field.
    Particles(ParticlesOutput),
    /// Burst particles.
    Burst(BurstOutput),
}

/// Per-leaf opacity and transform animations.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerProps {
    /// Opacity, clamped to `[0, 1]` when resolved.
    pub opacity: Anim,
    /// Horizontal translation in pixels.
    pub x: Anim,
    /// Vertical translation in pixels.
    pub y: Anim,
    /// Uniform scale.
    pub scale: Anim,
    /// Rotation in degrees.
    pub rotation_deg: Anim,
}

impl Default for LayerProps {
    fn default() -> Self {
        Self {
            opacity: Anim::constant(1.0),
            x: Anim::constant(0.0),
            y: Anim::constant(0.0),
            scale: Anim::constant(1.0),
            rotation_deg: Anim::constant(0.0),
        }
    }
}

impl LayerProps {
    /// Validate every animation.
    pub fn validate(&self) -> CadenceResult<()> {
        self.opacity.validate()?;
        self.x.validate()?;
        self.y.validate()?;
        self.scale.validate()?;
        self.rotation_deg.validate()
    }

    /// Opacity and transform at `ctx`.
    pub fn resolve(&self, ctx: SampleCtx) -> CadenceResult<(f64, Transform2D)> {
        let opacity = self.opacity.sample(ctx)?.clamp(0.0, 1.0);
        let scale = self.scale.sample(ctx)?;
        let transform = Transform2D {
            translate: Vec2::new(self.x.sample(ctx)?, self.y.sample(ctx)?),
            rotation_rad: self.rotation_deg.sample(ctx)?.to_radians(),
            scale: Vec2::new(scale, scale),
            anchor: Vec2::ZERO,
        };
        Ok((opacity, transform))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/elements/element.rs"]
mod tests;
