use crate::{
    elements::{Element, LayerProps, LeafRenderer},
    foundation::error::{CadenceError, CadenceResult},
};

/// One node of the timeline tree.
///
/// A node is active at a parent-local frame `p` iff `start <= p < start + duration`; its own
/// local frame is then `p - start`. `duration: None` is open-ended.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Path segment used in render output and error reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Offset in the parent's local frame space.
    #[serde(default)]
    pub start: i64,
    /// Window length in frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// What the node contains.
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Node contents.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// Children share the node's local time; later children draw on top.
    Group {
        /// Children in draw order.
        children: Vec<Node>,
    },
    /// Children play back to back, each offset by the durations of the ones before it.
    Series {
        /// Children in play order; each needs a duration.
        children: Vec<Node>,
    },
    /// The child sees `local mod period`, for `times` periods if set.
    Loop {
        /// Period in frames.
        period: u64,
        /// Number of repetitions; unbounded when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        times: Option<u64>,
        /// Looped subtree.
        child: Box<Node>,
    },
    /// The child always sees `frame`.
    Freeze {
        /// Frozen child-parent frame.
        frame: i64,
        /// Frozen subtree.
        child: Box<Node>,
    },
    /// A renderable element.
    Leaf {
        /// Element.
        element: Element,
        /// Opacity / transform animations.
        #[serde(default)]
        layer: LayerProps,
    },
}

impl Node {
    fn from_kind(kind: NodeKind) -> Self {
        Self {
            name: None,
            start: 0,
            duration: None,
            kind,
        }
    }

    /// Group of `children`.
    pub fn group(children: Vec<Node>) -> Self {
        Self::from_kind(NodeKind::Group { children })
    }

    /// Back-to-back series of `children`.
    pub fn series(children: Vec<Node>) -> Self {
        Self::from_kind(NodeKind::Series { children })
    }

    /// Leaf rendering `element` with default layer properties.
    pub fn leaf(element: Element) -> Self {
        Self::from_kind(NodeKind::Leaf {
            element,
            layer: LayerProps::default(),
        })
    }

    /// Loop `child` every `period` frames.
    pub fn looped(child: Node, period: u64, times: Option<u64>) -> Self {
        Self::from_kind(NodeKind::Loop {
            period,
            times,
            child: Box::new(child),
        })
    }

    /// Freeze `child` at `frame`.
    pub fn freeze(child: Node, frame: i64) -> Self {
        Self::from_kind(NodeKind::Freeze {
            frame,
            child: Box::new(child),
        })
    }

    /// Set the node name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the window `[start, start + duration)`.
    pub fn window(mut self, start: i64, duration: u64) -> Self {
        self.start = start;
        self.duration = Some(duration);
        self
    }

    /// Set only the start offset.
    pub fn at(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    /// Replace the layer properties of a leaf; no-op for other kinds.
    pub fn with_layer(mut self, props: LayerProps) -> Self {
        if let NodeKind::Leaf { layer, .. } = &mut self.kind {
            *layer = props;
        }
        self
    }

    /// `true` when a node with this window is active at parent-local frame `parent_local`.
    pub fn is_active_at(&self, parent_local: i64) -> bool {
        let local = parent_local.saturating_sub(self.start);
        local >= 0 && self.duration.is_none_or(|d| (local as u64) < d)
    }

    /// Validate the whole subtree.
    pub fn validate(&self) -> CadenceResult<()> {
        self.validate_at(&mut Vec::new())
    }

    fn validate_at<'a>(&'a self, path: &mut Vec<&'a str>) -> CadenceResult<()> {
        path.push(self.name.as_deref().unwrap_or("_"));
        let res = self.validate_self(path);
        path.pop();
        res
    }

    fn validate_self<'a>(&'a self, path: &mut Vec<&'a str>) -> CadenceResult<()> {
        if self.duration == Some(0) {
            return Err(CadenceError::validation(format!(
                "node '{}' duration must be > 0",
                path_str(path)
            )));
        }
        match &self.kind {
            NodeKind::Group { children } => {
                for c in children {
                    c.validate_at(path)?;
                }
            }
            NodeKind::Series { children } => {
                if let Some(c) = children.iter().find(|c| c.duration.is_none()) {
                    return Err(CadenceError::validation(format!(
                        "series '{}' child '{}' needs a duration",
                        path_str(path),
                        c.name.as_deref().unwrap_or("_")
                    )));
                }
                for c in children {
                    c.validate_at(path)?;
                }
            }
            NodeKind::Loop {
                period,
                times,
                child,
            } => {
                if *period == 0 {
                    return Err(CadenceError::validation(format!(
                        "loop '{}' period must be > 0",
                        path_str(path)
                    )));
                }
                if *times == Some(0) {
                    return Err(CadenceError::validation(format!(
                        "loop '{}' times must be > 0",
                        path_str(path)
                    )));
                }
                child.validate_at(path)?;
            }
            NodeKind::Freeze { child, .. } => child.validate_at(path)?,
            NodeKind::Leaf { element, layer } => {
                element.validate().map_err(|e| prefix_error(&path_str(path), e))?;
                layer.validate().map_err(|e| prefix_error(&path_str(path), e))?;
            }
        }
        Ok(())
    }

    /// Static file references of every leaf in the subtree.
    pub fn asset_refs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_asset_refs(&mut out);
        out
    }

    fn collect_asset_refs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match &self.kind {
            NodeKind::Group { children } | NodeKind::Series { children } => {
                for c in children {
                    c.collect_asset_refs(out);
                }
            }
            NodeKind::Loop { child, .. } | NodeKind::Freeze { child, .. } => {
                child.collect_asset_refs(out);
            }
            NodeKind::Leaf { element, .. } => out.extend(element.asset_refs()),
        }
    }

    /// Frames until the subtree stops drawing, when bounded.
    pub fn extent(&self) -> Option<u64> {
        let start = u64::try_from(self.start).unwrap_or(0);
        self.duration.map(|d| start.saturating_add(d))
    }
}

fn path_str(path: &[&str]) -> String {
    path.join("/")
}

fn prefix_error(path: &str, err: CadenceError) -> CadenceError {
    match err {
        CadenceError::Validation(m) => CadenceError::validation(format!("node '{path}': {m}")),
        CadenceError::InvalidRange(m) => CadenceError::invalid_range(format!("node '{path}': {m}")),
        CadenceError::InvalidSpringConfig(m) => {
            CadenceError::invalid_spring(format!("node '{path}': {m}"))
        }
        CadenceError::Animation(m) => CadenceError::animation(format!("node '{path}': {m}")),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/node.rs"]
mod tests;
