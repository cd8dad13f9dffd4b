use crate::{
    elements::LeafOutput,
    foundation::core::{Canvas, FrameIndex, Transform2D},
    foundation::error::{CadenceError, CadenceResult, ErrorKind},
};

/// Pure-data result of evaluating one composition frame.
///
/// Layers are in draw order (later on top). Serialization is byte-stable for equal trees.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderTree {
    /// Composition id.
    pub composition: String,
    /// Absolute frame.
    pub frame: FrameIndex,
    /// Composition canvas.
    pub canvas: Canvas,
    /// Drawn layers.
    pub layers: Vec<RenderLayer>,
    /// Subtrees that failed to evaluate; their siblings are still in `layers`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SubtreeError>,
}

impl RenderTree {
    /// Tree with no layers, as returned for frames outside the composition.
    pub fn empty(composition: impl Into<String>, frame: FrameIndex, canvas: Canvas) -> Self {
        Self {
            composition: composition.into(),
            frame,
            canvas,
            layers: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// `true` when nothing is drawn and nothing failed.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() && self.errors.is_empty()
    }

    /// First layer whose path is `path`.
    pub fn layer(&self, path: &str) -> Option<&RenderLayer> {
        self.layers.iter().find(|l| l.path == path)
    }

    /// Compact JSON.
    pub fn to_json(&self) -> CadenceResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON.
    pub fn to_json_pretty(&self) -> CadenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One drawn leaf.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderLayer {
    /// `/`-joined node names from the root (`#i` for unnamed nodes).
    pub path: String,
    /// Leaf-local frame.
    pub local_frame: i64,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
    /// Layer transform.
    pub transform: Transform2D,
    /// Leaf content.
    pub content: LeafOutput,
}

/// An error that aborted one subtree of a frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubtreeError {
    /// Path of the failing node.
    pub path: String,
    /// Error category.
    pub kind: ErrorKind,
    /// Display message.
    pub message: String,
}

impl SubtreeError {
    pub(crate) fn new(path: &str, err: &CadenceError) -> Self {
        Self {
            path: path.to_owned(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tree.rs"]
mod tests;
