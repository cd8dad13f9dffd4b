//! Nested timeline tree and its frame walker.

/// Node types and builders.
pub mod node;
/// Frame evaluation of a node tree.
pub mod walk;

pub use node::{Node, NodeKind};
pub use walk::{WalkEnv, WalkOpts, WalkOutput, walk};
