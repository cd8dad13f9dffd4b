use crate::{
    assets::{resolve_asset, static_file},
    elements::{FrameCtx, LeafOutput, LeafRenderer},
    foundation::error::{CadenceError, CadenceResult},
};

/// How an image fills its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fit {
    /// Fill the box, cropping overflow.
    #[default]
    Cover,
    /// Fit inside the box, letterboxing.
    Contain,
    /// Stretch to the box.
    Fill,
}

/// Static image leaf.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Image {
    /// Static file reference.
    pub src: String,
    /// Fit mode.
    #[serde(default)]
    pub fit: Fit,
    /// Box width in pixels; canvas width when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Box height in pixels; canvas height when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Image {
    /// Image filling the canvas.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            fit: Fit::Cover,
            width: None,
            height: None,
        }
    }
}

/// Rendered image parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageOutput {
    /// Location returned by the asset resolver.
    pub src: String,
    /// Fit mode.
    pub fit: Fit,
    /// Box width in pixels.
    pub width: f64,
    /// Box height in pixels.
    pub height: f64,
}

impl LeafRenderer for Image {
    fn validate(&self) -> CadenceResult<()> {
        static_file(&self.src)?;
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if let Some(v) = v
                && (!v.is_finite() || v <= 0.0)
            {
                return Err(CadenceError::validation(format!(
                    "image {name} must be > 0"
                )));
            }
        }
        Ok(())
    }

    fn asset_refs(&self) -> Vec<&str> {
        vec![self.src.as_str()]
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> CadenceResult<Option<LeafOutput>> {
        let src = resolve_asset(ctx.assets, &self.src)?;
        Ok(Some(LeafOutput::Image(ImageOutput {
            src,
            fit: self.fit,
            width: self.width.unwrap_or(f64::from(ctx.canvas.width)),
            height: self.height.unwrap_or(f64::from(ctx.canvas.height)),
        })))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/elements/media.rs"]
mod tests;
