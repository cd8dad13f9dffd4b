//! Scene schedules, composition assembly and project files.

/// Builder from schedule + scene nodes.
pub mod composer;
/// Validated composition and its metadata.
pub mod model;
/// JSON project files.
pub mod project;
/// Schedule table, lint and assembly.
pub mod schedule;

pub use composer::SceneComposer;
pub use model::{Composition, CompositionMeta};
pub use project::{CompositionDef, Project};
pub use schedule::{OverlapPolicy, Schedule, ScheduleEntry, ScheduleIssue};
