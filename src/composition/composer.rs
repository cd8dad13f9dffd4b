use indexmap::IndexMap;

use crate::{
    composition::{
        model::{Composition, CompositionMeta},
        schedule::{OverlapPolicy, Schedule, ScheduleEntry, ScheduleIssue},
    },
    foundation::core::{Canvas, Fps},
    foundation::error::{CadenceError, CadenceResult},
    timeline::node::Node,
};

/// Builds a [`Composition`] from a schedule table and one node per scene.
///
/// ```
/// use cadence::{Canvas, Element, Fps, Node, SceneComposer, TextReveal};
///
/// let comp = SceneComposer::new("promo", Fps::integer(30)?, Canvas { width: 1920, height: 1080 })
///     .duration(840)
///     .entry("scene1", 0, 90)
///     .scene("scene1", Node::leaf(Element::TextReveal(TextReveal::typewriter("Hello", 30))))
///     .build()?;
/// assert_eq!(comp.meta().duration_in_frames, 840);
/// # Ok::<(), cadence::CadenceError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SceneComposer {
    id: String,
    fps: Fps,
    canvas: Canvas,
    duration: Option<u64>,
    schedule: Schedule,
    scenes: IndexMap<String, Node>,
    overlap_policy: OverlapPolicy,
}

impl SceneComposer {
    /// Empty composer.
    pub fn new(id: impl Into<String>, fps: Fps, canvas: Canvas) -> Self {
        Self {
            id: id.into(),
            fps,
            canvas,
            duration: None,
            schedule: Schedule::new(),
            scenes: IndexMap::new(),
            overlap_policy: OverlapPolicy::Allow,
        }
    }

    /// Declared length; defaults to the schedule extent.
    pub fn duration(mut self, frames: u64) -> Self {
        self.duration = Some(frames);
        self
    }

    /// Replace the schedule table.
    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Add one schedule entry.
    pub fn entry(mut self, name: impl Into<String>, start: u64, duration: u64) -> Self {
        self.schedule.insert(name, ScheduleEntry::new(start, duration));
        self
    }

    /// Renderer of scene `name`; its frames are relative to the scene start.
    pub fn scene(mut self, name: impl Into<String>, node: Node) -> Self {
        self.scenes.insert(name.into(), node);
        self
    }

    /// Overlap handling.
    pub fn overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }

    /// Check the schedule and return the timeline length plus lint findings.
    fn checked_duration(&self) -> CadenceResult<(u64, Vec<ScheduleIssue>)> {
        self.schedule.validate()?;
        let duration = self.duration.unwrap_or_else(|| self.schedule.extent());
        if duration == 0 {
            return Err(CadenceError::validation(format!(
                "composition '{}' has no duration and an empty schedule",
                self.id
            )));
        }
        self.schedule.check_fits(duration)?;

        let issues = self.schedule.lint(duration);
        for issue in &issues {
            tracing::warn!(composition = %self.id, %issue, "schedule lint");
        }
        if self.overlap_policy == OverlapPolicy::Reject
            && let Some(overlap) = issues
                .iter()
                .find(|i| matches!(i, ScheduleIssue::Overlap { .. }))
        {
            return Err(CadenceError::schedule_overflow(format!(
                "composition '{}': {overlap}",
                self.id
            )));
        }
        Ok((duration, issues))
    }

    /// Lint findings without building.
    pub fn lint(&self) -> CadenceResult<Vec<ScheduleIssue>> {
        self.checked_duration().map(|(_, issues)| issues)
    }

    /// Assemble the scenes into a validated composition.
    pub fn build(self) -> CadenceResult<Composition> {
        let (duration, _) = self.checked_duration()?;
        let root = self.schedule.assemble(self.scenes)?;
        let meta = CompositionMeta {
            id: self.id,
            duration_in_frames: duration,
            fps: self.fps,
            width: self.canvas.width,
            height: self.canvas.height,
        };
        Composition::new(meta, root)
    }

    /// Assemble the scenes into an act node, to be scheduled as a scene of an outer composer.
    ///
    /// The act is open-ended; the outer schedule window clips it.
    pub fn build_act(self) -> CadenceResult<Node> {
        self.checked_duration()?;
        let act = self.schedule.assemble(self.scenes)?;
        act.validate()?;
        Ok(act)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/composer.rs"]
mod tests;
