use crate::{
    assets::{AssetResolver, resolve_asset, static_file},
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{CadenceError, CadenceResult},
    procedural::cache::FieldCache,
    render::tree::RenderTree,
    timeline::{
        node::Node,
        walk::{WalkEnv, WalkOpts, walk},
    },
};

/// Identity and format of a composition, as reported to the external renderer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompositionMeta {
    /// Unique id in a registry.
    pub id: String,
    /// Total length; frames at or past it render empty.
    pub duration_in_frames: u64,
    /// Frame rate.
    pub fps: Fps,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl CompositionMeta {
    /// Canvas from `width`/`height`.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.duration_in_frames as f64)
    }

    /// Reject empty ids, zero durations, invalid fps and empty canvases.
    pub fn validate(&self) -> CadenceResult<()> {
        if self.id.trim().is_empty() {
            return Err(CadenceError::validation("composition id must be non-empty"));
        }
        if self.duration_in_frames == 0 {
            return Err(CadenceError::validation(format!(
                "composition '{}' duration_in_frames must be > 0",
                self.id
            )));
        }
        if !self.fps.is_valid() {
            return Err(CadenceError::validation(format!(
                "composition '{}' fps must be > 0",
                self.id
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(CadenceError::validation(format!(
                "composition '{}' canvas must be non-empty",
                self.id
            )));
        }
        Ok(())
    }
}

/// A validated, immutable timeline ready for per-frame evaluation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Composition {
    meta: CompositionMeta,
    root: Node,
}

impl Composition {
    /// Validate `meta` and the whole `root` subtree.
    pub fn new(meta: CompositionMeta, root: Node) -> CadenceResult<Self> {
        meta.validate()?;
        root.validate()?;
        Ok(Self { meta, root })
    }

    /// Identity and format.
    pub fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    /// Composition id.
    pub fn id(&self) -> &str {
        &self.meta.id
    }

    /// Root timeline node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Check every static file reference against `assets`.
    pub fn check_assets(&self, assets: &dyn AssetResolver) -> CadenceResult<()> {
        for reference in self.root.asset_refs() {
            let path = static_file(reference)?;
            resolve_asset(assets, &path)?;
        }
        Ok(())
    }

    /// Evaluate `frame`. Frames outside `[0, duration_in_frames)` give an empty tree.
    pub fn evaluate(
        &self,
        frame: FrameIndex,
        assets: &dyn AssetResolver,
        fields: &FieldCache,
        opts: WalkOpts,
    ) -> RenderTree {
        let canvas = self.meta.canvas();
        if frame.0 >= self.meta.duration_in_frames {
            return RenderTree::empty(self.meta.id.clone(), frame, canvas);
        }
        let env = WalkEnv {
            fps: self.meta.fps,
            canvas,
            assets,
            fields,
        };
        let out = walk(&self.root, frame.as_i64(), &env, opts);
        RenderTree {
            composition: self.meta.id.clone(),
            frame,
            canvas,
            layers: out.layers,
            errors: out.errors,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
