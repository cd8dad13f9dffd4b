use crate::{
    animation::anim::Anim,
    animation::interpolate::{InterpolateOpts, interpolate_color},
    elements::{FrameCtx, LeafOutput, LeafRenderer},
    foundation::core::Rgba8,
    foundation::error::{CadenceError, CadenceResult},
};

/// Shape geometry in local pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Axis-aligned rectangle.
    Rect {
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
        /// Corner radius in pixels.
        #[serde(default)]
        corner_radius: f64,
    },
    /// Circle around the origin.
    Circle {
        /// Radius in pixels.
        radius: f64,
    },
    /// SVG path data.
    Path {
        /// Path `d` attribute.
        d: String,
    },
    /// Cycle through several paths, `frames_per_path` frames each.
    PathCycle {
        /// Path `d` attributes.
        paths: Vec<String>,
        /// Frames each path is shown for.
        frames_per_path: u64,
    },
}

impl Geometry {
    fn validate(&self) -> CadenceResult<()> {
        let positive = |v: f64, what: &str| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CadenceError::validation(format!("shape {what} must be > 0")))
            }
        };
        match self {
            Self::Rect {
                width,
                height,
                corner_radius,
            } => {
                positive(*width, "width")?;
                positive(*height, "height")?;
                if !corner_radius.is_finite() || *corner_radius < 0.0 {
                    return Err(CadenceError::validation(
                        "shape corner_radius must be >= 0",
                    ));
                }
                Ok(())
            }
            Self::Circle { radius } => positive(*radius, "radius"),
            Self::Path { d } => {
                if d.trim().is_empty() {
                    return Err(CadenceError::validation("shape path must be non-empty"));
                }
                Ok(())
            }
            Self::PathCycle {
                paths,
                frames_per_path,
            } => {
                if paths.is_empty() || paths.iter().any(|d| d.trim().is_empty()) {
                    return Err(CadenceError::validation(
                        "shape path_cycle needs non-empty paths",
                    ));
                }
                if *frames_per_path == 0 {
                    return Err(CadenceError::validation(
                        "shape path_cycle frames_per_path must be > 0",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Concrete geometry at `frame`; a path cycle picks one of its paths.
    pub fn at_frame(&self, frame: i64) -> Geometry {
        match self {
            Self::PathCycle {
                paths,
                frames_per_path,
            } if !paths.is_empty() && *frames_per_path > 0 => {
                let step = frame.max(0) as u64 / frames_per_path;
                let idx = (step % paths.len() as u64) as usize;
                Self::Path {
                    d: paths[idx].clone(),
                }
            }
            other => other.clone(),
        }
    }
}

/// Outline of a shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Stroke colour.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Colour keyed on node-local frames, clamped at both ends.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorRamp {
    /// Frames of each colour stop.
    pub input_range: Vec<f64>,
    /// Colour stops.
    pub colors: Vec<Rgba8>,
}

impl ColorRamp {
    /// Colour at `frame`.
    pub fn sample(&self, frame: i64) -> CadenceResult<Rgba8> {
        interpolate_color(
            frame as f64,
            &self.input_range,
            &self.colors,
            &InterpolateOpts::clamped(),
        )
    }
}

/// Vector shape leaf.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    /// Geometry.
    pub geometry: Geometry,
    /// Static fill, used when `fill_ramp` is absent.
    #[serde(default)]
    pub fill: Rgba8,
    /// Animated fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_ramp: Option<ColorRamp>,
    /// Optional outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    /// Fraction of the outline drawn, clamped to `[0, 1]`; fully drawn when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw: Option<Anim>,
}

impl Shape {
    /// Filled shape without outline.
    pub fn filled(geometry: Geometry, fill: Rgba8) -> Self {
        Self {
            geometry,
            fill,
            fill_ramp: None,
            stroke: None,
            draw: None,
        }
    }
}

/// Rendered shape parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeOutput {
    /// Geometry chosen for this frame.
    pub geometry: Geometry,
    /// Fill colour.
    pub fill: Rgba8,
    /// Outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    /// Drawn fraction of the outline.
    pub draw_progress: f64,
}

impl LeafRenderer for Shape {
    fn validate(&self) -> CadenceResult<()> {
        self.geometry.validate()?;
        if let Some(stroke) = &self.stroke
            && (!stroke.width.is_finite() || stroke.width < 0.0)
        {
            return Err(CadenceError::validation("shape stroke width must be >= 0"));
        }
        if let Some(ramp) = &self.fill_ramp {
            ramp.sample(0)?;
        }
        if let Some(draw) = &self.draw {
            draw.validate()?;
        }
        Ok(())
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> CadenceResult<Option<LeafOutput>> {
        let fill = match &self.fill_ramp {
            Some(ramp) => ramp.sample(ctx.frame)?,
            None => self.fill,
        };
        let draw_progress = match &self.draw {
            Some(anim) => anim.sample(ctx.sample_ctx())?.clamp(0.0, 1.0),
            None => 1.0,
        };
        Ok(Some(LeafOutput::Shape(ShapeOutput {
            geometry: self.geometry.at_frame(ctx.frame),
            fill,
            stroke: self.stroke,
            draw_progress,
        })))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/elements/shape.rs"]
mod tests;
