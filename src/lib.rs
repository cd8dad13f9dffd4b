//! Cadence is a deterministic motion engine for programmatic video.
//!
//! Every visual parameter is a pure function of an integer frame number, so any frame can be
//! evaluated in any order, on any thread, without replaying the frames before it:
//!
//! - Build a [`Composition`] with a [`SceneComposer`] or load one from a [`Project`] file
//! - Register it in a [`Registry`]
//! - Ask for [`Registry::render`] at any frame and hand the resulting [`RenderTree`] to a
//!   rasterizer
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easing, interpolation, springs and animated values.
pub mod animation;
/// Static file references and resolvers.
pub mod assets;
/// Schedules, composers and project files.
pub mod composition;
/// Leaf element renderers.
pub mod elements;
/// Core value types and errors.
pub mod foundation;
/// Seeded particle fields and bursts.
pub mod procedural;
/// Registry, render trees and fingerprints.
pub mod render;
/// Timeline nodes and the frame walker.
pub mod timeline;

pub use crate::animation::{
    anim::{Anim, SampleCtx},
    ease::Ease,
    interpolate::{Extrapolate, InterpolateOpts, Interpolation, interpolate, interpolate_color},
    spring::{SpringAnimation, SpringConfig, measure_spring, spring},
};
pub use crate::assets::{AssetResolver, AssetsConfig, PassthroughAssets, StaticAssets, static_file};
pub use crate::composition::{
    Composition, CompositionMeta, OverlapPolicy, Project, SceneComposer, Schedule, ScheduleEntry,
    ScheduleIssue,
};
pub use crate::elements::{Element, LayerProps, LeafOutput, TextReveal};
pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Rgba8, Transform2D, Vec2,
};
pub use crate::foundation::error::{CadenceError, CadenceResult, ErrorKind};
pub use crate::procedural::{
    burst::{BurstParams, burst_state},
    cache::FieldCache,
    field::{FieldParams, Particle, generate_field},
};
pub use crate::render::{
    FrameFingerprint, Registry, RenderLayer, RenderThreading, RenderTree, SubtreeError,
    fingerprint_tree,
};
pub use crate::timeline::{Node, NodeKind, WalkOpts};
