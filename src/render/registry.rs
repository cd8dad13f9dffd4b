use std::{collections::BTreeMap, sync::Arc};

use rayon::prelude::*;

use crate::{
    assets::{AssetResolver, PassthroughAssets},
    composition::model::{Composition, CompositionMeta},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{CadenceError, CadenceResult},
    procedural::cache::FieldCache,
    render::tree::RenderTree,
    timeline::walk::WalkOpts,
};

/// Threading and batching for [`Registry::render_range`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    /// Evaluate chunks on a rayon pool.
    pub parallel: bool,
    /// Frames per chunk; 0 is treated as 1.
    pub chunk_size: usize,
    /// Pool size; rayon's default when `None`.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Process-wide set of compositions plus the shared asset resolver and field cache.
///
/// `render` takes `&self` and is safe to call from many threads at once.
pub struct Registry {
    compositions: BTreeMap<String, Composition>,
    order: Vec<String>,
    assets: Arc<dyn AssetResolver>,
    fields: FieldCache,
    walk: WalkOpts,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_assets(Arc::new(PassthroughAssets))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("compositions", &self.order)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Empty registry resolving static files through `assets`.
    pub fn with_assets(assets: Arc<dyn AssetResolver>) -> Self {
        Self {
            compositions: BTreeMap::new(),
            order: Vec::new(),
            assets,
            fields: FieldCache::default(),
            walk: WalkOpts::default(),
        }
    }

    /// Replace the walker options.
    pub fn with_walk_opts(mut self, opts: WalkOpts) -> Self {
        self.walk = opts;
        self
    }

    /// Add a composition. Ids are unique and every static file must resolve.
    pub fn register(&mut self, comp: Composition) -> CadenceResult<()> {
        let id = comp.id().to_owned();
        if self.compositions.contains_key(&id) {
            return Err(CadenceError::validation(format!(
                "composition '{id}' is already registered"
            )));
        }
        comp.check_assets(self.assets.as_ref())?;
        tracing::debug!(composition = %id, "registered");
        self.order.push(id.clone());
        self.compositions.insert(id, comp);
        Ok(())
    }

    /// Metadata of every composition in registration order.
    pub fn compositions(&self) -> Vec<CompositionMeta> {
        self.order
            .iter()
            .filter_map(|id| self.compositions.get(id))
            .map(|c| c.meta().clone())
            .collect()
    }

    /// Registered composition `id`.
    pub fn get(&self, id: &str) -> CadenceResult<&Composition> {
        self.compositions
            .get(id)
            .ok_or_else(|| CadenceError::validation(format!("unknown composition '{id}'")))
    }

    /// Shared particle-field memo.
    pub fn field_cache(&self) -> &FieldCache {
        &self.fields
    }

    /// Render tree of composition `id` at absolute `frame`.
    ///
    /// Frames past the end yield an empty tree.
    #[tracing::instrument(skip(self))]
    pub fn render(&self, id: &str, frame: u64) -> CadenceResult<RenderTree> {
        let comp = self.get(id)?;
        Ok(self.evaluate(comp, FrameIndex(frame)))
    }

    fn evaluate(&self, comp: &Composition, frame: FrameIndex) -> RenderTree {
        comp.evaluate(frame, self.assets.as_ref(), &self.fields, self.walk)
    }

    /// Render trees for every frame of `range`, in frame order.
    ///
    /// The output does not depend on `threading`.
    #[tracing::instrument(skip(self, threading))]
    pub fn render_range(
        &self,
        id: &str,
        range: FrameRange,
        threading: &RenderThreading,
    ) -> CadenceResult<Vec<RenderTree>> {
        let comp = self.get(id)?;
        let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);

        if !threading.parallel {
            for f in range.start.0..range.end.0 {
                out.push(self.evaluate(comp, FrameIndex(f)));
            }
            return Ok(out);
        }

        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = normalized_chunk_size(threading.chunk_size);
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = chunk_start.saturating_add(chunk_size).min(range.end.0);
            tracing::debug!(start = chunk_start, end = chunk_end, "render chunk");
            let mut trees: Vec<RenderTree> = pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|f| self.evaluate(comp, FrameIndex(f)))
                    .collect()
            });
            out.append(&mut trees);
            chunk_start = chunk_end;
        }
        Ok(out)
    }
}

fn build_thread_pool(threads: Option<usize>) -> CadenceResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CadenceError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CadenceError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 { 1 } else { chunk_size as u64 }
}

#[cfg(test)]
#[path = "../../tests/unit/render/registry.rs"]
mod tests;
