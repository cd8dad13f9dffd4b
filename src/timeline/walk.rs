use crate::{
    assets::AssetResolver,
    elements::{FrameCtx, LeafRenderer},
    foundation::core::{Canvas, Fps},
    procedural::cache::FieldCache,
    render::tree::{RenderLayer, SubtreeError},
    timeline::node::{Node, NodeKind},
};

/// Walker switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkOpts {
    /// Skip inactive subtrees instead of visiting them with leaves disabled.
    pub prune_inactive: bool,
}

impl Default for WalkOpts {
    fn default() -> Self {
        Self {
            prune_inactive: true,
        }
    }
}

/// Composition-wide inputs shared by every leaf of one walk.
#[derive(Clone, Copy)]
pub struct WalkEnv<'a> {
    /// Composition frame rate.
    pub fps: Fps,
    /// Composition canvas.
    pub canvas: Canvas,
    /// Static-asset resolver.
    pub assets: &'a dyn AssetResolver,
    /// Particle-field memo.
    pub fields: &'a FieldCache,
}

impl std::fmt::Debug for WalkEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkEnv")
            .field("fps", &self.fps)
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

/// Layers and isolated failures collected by [`walk`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalkOutput {
    /// Drawn leaves in declaration order.
    pub layers: Vec<RenderLayer>,
    /// Leaves that failed; their siblings are unaffected.
    pub errors: Vec<SubtreeError>,
}

/// Evaluate `root` at `frame` (the root's parent-local frame).
///
/// Paths join node names with `/`; unnamed children use `#<index>`. The root adds a segment
/// only when it is named.
pub fn walk(root: &Node, frame: i64, env: &WalkEnv<'_>, opts: WalkOpts) -> WalkOutput {
    let mut walker = Walker {
        env,
        opts,
        path: Vec::new(),
        out: WalkOutput::default(),
    };
    let pushed = match &root.name {
        Some(name) => {
            walker.path.push(name.clone());
            true
        }
        None => false,
    };
    walker.visit(root, frame, true);
    if pushed {
        walker.path.pop();
    }
    walker.out
}

struct Walker<'e, 'a> {
    env: &'e WalkEnv<'a>,
    opts: WalkOpts,
    path: Vec<String>,
    out: WalkOutput,
}

impl Walker<'_, '_> {
    fn visit(&mut self, node: &Node, parent_local: i64, parent_active: bool) {
        let active = parent_active && node.is_active_at(parent_local);
        if !active && self.opts.prune_inactive {
            return;
        }
        let local = parent_local.saturating_sub(node.start);

        match &node.kind {
            NodeKind::Group { children } => {
                for (i, child) in children.iter().enumerate() {
                    self.visit_child(i, child, local, active);
                }
            }
            NodeKind::Series { children } => {
                let mut offset: i64 = 0;
                for (i, child) in children.iter().enumerate() {
                    self.visit_child(i, child, local.saturating_sub(offset), active);
                    let len = child.duration.unwrap_or(0);
                    offset = offset.saturating_add(i64::try_from(len).unwrap_or(i64::MAX));
                }
            }
            NodeKind::Loop {
                period,
                times,
                child,
            } => {
                let period = i64::try_from(*period).unwrap_or(i64::MAX).max(1);
                let within = times.is_none_or(|t| {
                    local < period.saturating_mul(i64::try_from(t).unwrap_or(i64::MAX))
                });
                self.visit_child(0, child, local.rem_euclid(period), active && within);
            }
            NodeKind::Freeze { frame, child } => {
                self.visit_child(0, child, *frame, active);
            }
            NodeKind::Leaf { element, layer } => {
                if !active {
                    return;
                }
                let ctx = FrameCtx {
                    frame: local,
                    duration: node.duration,
                    fps: self.env.fps,
                    canvas: self.env.canvas,
                    assets: self.env.assets,
                    fields: self.env.fields,
                };
                let res = layer
                    .resolve(ctx.sample_ctx())
                    .and_then(|props| element.render(&ctx).map(|c| c.map(|c| (props, c))));
                let path = self.path.join("/");
                match res {
                    Ok(Some(((opacity, transform), content))) => {
                        self.out.layers.push(RenderLayer {
                            path,
                            local_frame: local,
                            opacity,
                            transform,
                            content,
                        });
                    }
                    Ok(None) => {}
                    Err(err) => {
                        tracing::warn!(path = %path, frame = local, error = %err, "leaf failed");
                        self.out.errors.push(SubtreeError::new(&path, &err));
                    }
                }
            }
        }
    }

    fn visit_child(&mut self, index: usize, child: &Node, parent_local: i64, active: bool) {
        let segment = match &child.name {
            Some(name) => name.clone(),
            None => format!("#{index}"),
        };
        self.path.push(segment);
        self.visit(child, parent_local, active);
        self.path.pop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/walk.rs"]
mod tests;
