use std::{fs::File, io::BufReader, path::Path};

use indexmap::IndexMap;

use crate::{
    assets::{AssetResolver, AssetsConfig, PassthroughAssets},
    composition::{
        composer::SceneComposer,
        model::Composition,
        schedule::{OverlapPolicy, Schedule},
    },
    foundation::core::{Canvas, Fps},
    foundation::error::{CadenceError, CadenceResult},
    render::registry::Registry,
    timeline::node::Node,
};

/// JSON project file: compositions plus the static-asset table.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    /// Compositions in registration order.
    pub compositions: Vec<CompositionDef>,
    /// Known static files; every reference passes through when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<AssetsConfig>,
}

/// One composition as written in a project file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositionDef {
    /// Unique id.
    pub id: String,
    /// Frame rate (`30` or `{ "num": 30000, "den": 1001 }`).
    pub fps: Fps,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Declared length; defaults to the schedule extent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_frames: Option<u64>,
    /// Overlap handling.
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
    /// Scene windows.
    pub schedule: Schedule,
    /// Scene renderers keyed by scene name.
    pub scenes: IndexMap<String, Node>,
}

impl CompositionDef {
    /// Composer for this definition.
    pub fn composer(&self) -> SceneComposer {
        let canvas = Canvas {
            width: self.width,
            height: self.height,
        };
        let mut composer = SceneComposer::new(self.id.clone(), self.fps, canvas)
            .schedule(self.schedule.clone())
            .overlap_policy(self.overlap_policy);
        if let Some(d) = self.duration_in_frames {
            composer = composer.duration(d);
        }
        for (name, node) in &self.scenes {
            composer = composer.scene(name.clone(), node.clone());
        }
        composer
    }

    /// Build and validate the composition.
    pub fn build(&self) -> CadenceResult<Composition> {
        self.composer().build()
    }
}

impl Project {
    /// Parse a project from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CadenceResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CadenceError::serde(format!("parse project JSON: {e}")))
    }

    /// Parse a project from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CadenceResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CadenceError::validation(format!("open project JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Resolver described by the `assets` table.
    pub fn resolver(&self) -> CadenceResult<Box<dyn AssetResolver>> {
        Ok(match &self.assets {
            Some(cfg) => Box::new(cfg.to_resolver()?),
            None => Box::new(PassthroughAssets),
        })
    }

    /// Build every composition and register it, checking asset references.
    pub fn into_registry(self) -> CadenceResult<Registry> {
        let mut registry = Registry::with_assets(self.resolver()?.into());
        for def in &self.compositions {
            registry.register(def.build()?)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/project.rs"]
mod tests;
