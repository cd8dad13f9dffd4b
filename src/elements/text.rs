use crate::{
    animation::ease::Ease,
    animation::timing::{progress, revealed_count},
    elements::{FrameCtx, LeafOutput, LeafRenderer},
    foundation::core::Rgba8,
    foundation::error::{CadenceError, CadenceResult},
    foundation::math::lerp_exact,
};

/// Caret blink phase per frame: visible while `sin(frame * CARET_BLINK_RATE) > 0`.
pub const CARET_BLINK_RATE: f64 = 0.3;
/// Vertical travel of [`RevealStyle::SlideUp`] in pixels.
pub const SLIDE_DISTANCE: f64 = 30.0;

/// How a [`TextReveal`] uncovers its text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealStyle {
    /// Characters appear one by one, with a blinking caret.
    #[default]
    Typewriter,
    /// Whole text fades in.
    Fade,
    /// Whole text fades in while rising.
    SlideUp,
    /// Words appear one by one.
    WordByWord,
}

/// Text revealed progressively from `start_frame`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextReveal {
    /// Full text.
    pub text: String,
    /// Node-local frame the reveal begins at; nothing is drawn before it.
    #[serde(default)]
    pub start_frame: i64,
    /// Reveal style.
    #[serde(default)]
    pub style: RevealStyle,
    /// Typewriter speed.
    #[serde(default = "default_chars_per_frame")]
    pub chars_per_frame: f64,
    /// Word-by-word pace.
    #[serde(default = "default_frames_per_word")]
    pub frames_per_word: u64,
    /// Length of the fade / slide-up transition.
    #[serde(default = "default_transition_frames")]
    pub transition_frames: u64,
    /// Draw a blinking caret in typewriter mode.
    #[serde(default = "default_true")]
    pub caret: bool,
    /// Text colour.
    #[serde(default)]
    pub color: Rgba8,
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

fn default_chars_per_frame() -> f64 {
    0.8
}

fn default_frames_per_word() -> u64 {
    6
}

fn default_transition_frames() -> u64 {
    20
}

fn default_true() -> bool {
    true
}

fn default_font_size() -> f64 {
    48.0
}

impl TextReveal {
    /// Typewriter reveal of `text` starting at `start_frame`.
    pub fn typewriter(text: impl Into<String>, start_frame: i64) -> Self {
        Self {
            text: text.into(),
            start_frame,
            style: RevealStyle::Typewriter,
            chars_per_frame: default_chars_per_frame(),
            frames_per_word: default_frames_per_word(),
            transition_frames: default_transition_frames(),
            caret: true,
            color: Rgba8::WHITE,
            font_size: default_font_size(),
        }
    }

    /// Same text with another style.
    pub fn with_style(mut self, style: RevealStyle) -> Self {
        self.style = style;
        self
    }
}

/// Rendered text run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextOutput {
    /// Visible text.
    pub text: String,
    /// Caret drawn after the text.
    pub caret: bool,
    /// Text colour.
    pub color: Rgba8,
    /// Font size in pixels.
    pub font_size: f64,
    /// Style opacity, multiplied with the layer opacity by the renderer.
    pub opacity: f64,
    /// Extra vertical offset in pixels.
    pub offset_y: f64,
}

impl LeafRenderer for TextReveal {
    fn validate(&self) -> CadenceResult<()> {
        if !self.chars_per_frame.is_finite() || self.chars_per_frame <= 0.0 {
            return Err(CadenceError::validation(
                "text_reveal chars_per_frame must be > 0",
            ));
        }
        if self.frames_per_word == 0 {
            return Err(CadenceError::validation(
                "text_reveal frames_per_word must be > 0",
            ));
        }
        if self.transition_frames == 0 {
            return Err(CadenceError::validation(
                "text_reveal transition_frames must be > 0",
            ));
        }
        validate_font_size(self.font_size)
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> CadenceResult<Option<LeafOutput>> {
        let rel = ctx.frame.saturating_sub(self.start_frame);
        if rel < 0 {
            return Ok(None);
        }

        let mut out = TextOutput {
            text: String::new(),
            caret: false,
            color: self.color,
            font_size: self.font_size,
            opacity: 1.0,
            offset_y: 0.0,
        };
        match self.style {
            RevealStyle::Typewriter => {
                let total = self.text.chars().count();
                let n = revealed_count(rel, self.chars_per_frame, total);
                out.text = self.text.chars().take(n).collect();
                out.caret = self.caret && (ctx.frame as f64 * CARET_BLINK_RATE).sin() > 0.0;
            }
            RevealStyle::WordByWord => {
                let words: Vec<&str> = self.text.split_whitespace().collect();
                let per_word = i64::try_from(self.frames_per_word).unwrap_or(i64::MAX);
                let shown = usize::try_from(rel / per_word + 1).unwrap_or(usize::MAX);
                out.text = words[..shown.min(words.len())].join(" ");
            }
            RevealStyle::Fade => {
                out.text = self.text.clone();
                out.opacity = progress(rel, 0, self.transition_frames, Ease::Linear);
            }
            RevealStyle::SlideUp => {
                let p = progress(rel, 0, self.transition_frames, Ease::OutCubic);
                out.text = self.text.clone();
                out.opacity = p;
                out.offset_y = lerp_exact(SLIDE_DISTANCE, 0.0, p);
            }
        }
        Ok(Some(LeafOutput::Text(out)))
    }
}

/// Number counting from `from` to `to`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Counter {
    /// Start value.
    #[serde(default)]
    pub from: f64,
    /// End value.
    pub to: f64,
    /// Node-local frame the count starts at.
    #[serde(default)]
    pub start_frame: i64,
    /// Frames to reach `to`.
    #[serde(default = "default_count_frames")]
    pub duration: u64,
    /// Easing of the count.
    #[serde(default = "default_count_ease")]
    pub ease: Ease,
    /// Digits after the decimal point.
    #[serde(default)]
    pub decimals: u8,
    /// Text before the number.
    #[serde(default)]
    pub prefix: String,
    /// Text after the number.
    #[serde(default)]
    pub suffix: String,
    /// Text colour.
    #[serde(default)]
    pub color: Rgba8,
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

fn default_count_frames() -> u64 {
    60
}

fn default_count_ease() -> Ease {
    Ease::OutCubic
}

impl Counter {
    /// Value at node-local `frame`.
    pub fn value_at(&self, frame: i64) -> f64 {
        let p = progress(frame, self.start_frame, self.duration, self.ease);
        lerp_exact(self.from, self.to, p)
    }
}

impl LeafRenderer for Counter {
    fn validate(&self) -> CadenceResult<()> {
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(CadenceError::validation("counter from/to must be finite"));
        }
        if self.decimals > 12 {
            return Err(CadenceError::validation("counter decimals must be <= 12"));
        }
        validate_font_size(self.font_size)
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> CadenceResult<Option<LeafOutput>> {
        let value = self.value_at(ctx.frame);
        let decimals = usize::from(self.decimals);
        Ok(Some(LeafOutput::Text(TextOutput {
            text: format!("{}{value:.decimals$}{}", self.prefix, self.suffix),
            caret: false,
            color: self.color,
            font_size: self.font_size,
            opacity: 1.0,
            offset_y: 0.0,
        })))
    }
}

fn validate_font_size(font_size: f64) -> CadenceResult<()> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(CadenceError::validation("font_size must be > 0"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/elements/text.rs"]
mod tests;
