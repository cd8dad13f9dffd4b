//! Registry, render trees and frame fingerprints.

/// Frame digests.
pub mod fingerprint;
/// Composition registry and range rendering.
pub mod registry;
/// Pure-data frame output.
pub mod tree;

pub use fingerprint::{FrameFingerprint, fingerprint_content, fingerprint_tree};
pub use registry::{Registry, RenderThreading};
pub use tree::{RenderLayer, RenderTree, SubtreeError};
