use indexmap::IndexMap;

use crate::{
    foundation::error::{CadenceError, CadenceResult},
    timeline::node::{Node, NodeKind},
};

/// Fixed window of one scene in its parent's frame space.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleEntry {
    /// First frame of the scene.
    pub start: u64,
    /// Length in frames; must be > 0.
    pub duration: u64,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ScheduleEntry {
    /// Entry without a label.
    pub fn new(start: u64, duration: u64) -> Self {
        Self {
            start,
            duration,
            label: None,
        }
    }

    /// Attach a label.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Exclusive end frame.
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.duration)
    }
}

/// Ordered `scene name -> window` table.
///
/// Serialized as a JSON object; declaration order is kept and is also the draw order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    entries: IndexMap<String, ScheduleEntry>,
}

/// What to do when two scheduled scenes overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Overlaps are reported by lint only; both scenes draw.
    #[default]
    Allow,
    /// Overlaps fail the build with `ScheduleOverflow`.
    Reject,
}

/// Lint finding for a schedule.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ScheduleIssue {
    /// No scene covers `[start, end)`.
    Gap {
        /// First uncovered frame.
        start: u64,
        /// End of the gap (exclusive).
        end: u64,
    },
    /// Two scenes share `[start, end)`.
    Overlap {
        /// Earlier scene.
        first: String,
        /// Later scene.
        second: String,
        /// First shared frame.
        start: u64,
        /// End of the shared span (exclusive).
        end: u64,
    },
    /// Frames after the last scene up to the composition end.
    UncoveredTail {
        /// First uncovered frame.
        start: u64,
        /// Composition duration.
        end: u64,
    },
}

impl std::fmt::Display for ScheduleIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gap { start, end } => write!(f, "gap: no scene covers frames {start}..{end}"),
            Self::Overlap {
                first,
                second,
                start,
                end,
            } => write!(
                f,
                "overlap: '{first}' and '{second}' share frames {start}..{end}"
            ),
            Self::UncoveredTail { start, end } => {
                write!(f, "uncovered tail: frames {start}..{end} have no scene")
            }
        }
    }
}

impl Schedule {
    /// Empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a scene window; returns the previous entry.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        entry: ScheduleEntry,
    ) -> Option<ScheduleEntry> {
        self.entries.insert(name.into(), entry)
    }

    /// Builder form of [`Schedule::insert`].
    pub fn with(mut self, name: impl Into<String>, start: u64, duration: u64) -> Self {
        self.insert(name, ScheduleEntry::new(start, duration));
        self
    }

    /// Window of `name`.
    pub fn get(&self, name: &str) -> Option<&ScheduleEntry> {
        self.entries.get(name)
    }

    /// Scene names and windows in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScheduleEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` with no scenes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest `start + duration`, or 0.
    pub fn extent(&self) -> u64 {
        self.entries.values().map(ScheduleEntry::end).max().unwrap_or(0)
    }

    /// Reject empty names and zero-length windows.
    pub fn validate(&self) -> CadenceResult<()> {
        for (name, e) in &self.entries {
            if name.is_empty() {
                return Err(CadenceError::validation(
                    "schedule scene name must be non-empty",
                ));
            }
            if e.duration == 0 {
                return Err(CadenceError::validation(format!(
                    "schedule entry '{name}' duration must be > 0"
                )));
            }
        }
        Ok(())
    }

    /// Fail with `ScheduleOverflow` when a window ends after `duration`.
    pub fn check_fits(&self, duration: u64) -> CadenceResult<()> {
        for (name, e) in &self.entries {
            if e.end() > duration {
                return Err(CadenceError::schedule_overflow(format!(
                    "scene '{name}' ends at frame {} but the timeline has {duration} frames",
                    e.end()
                )));
            }
        }
        Ok(())
    }

    /// Gaps, overlaps and the uncovered tail of `[0, duration)`.
    pub fn lint(&self, duration: u64) -> Vec<ScheduleIssue> {
        let mut sorted: Vec<(&str, &ScheduleEntry)> = self.iter().collect();
        sorted.sort_by_key(|(_, e)| e.start);

        let mut issues = Vec::new();
        let mut covered = 0u64;
        for (i, (name, e)) in sorted.iter().enumerate() {
            if e.start > covered {
                issues.push(ScheduleIssue::Gap {
                    start: covered,
                    end: e.start,
                });
            }
            for (other, o) in &sorted[..i] {
                let end = o.end().min(e.end());
                if end > e.start {
                    issues.push(ScheduleIssue::Overlap {
                        first: (*other).to_owned(),
                        second: (*name).to_owned(),
                        start: e.start,
                        end,
                    });
                }
            }
            covered = covered.max(e.end());
        }
        if covered < duration {
            issues.push(ScheduleIssue::UncoveredTail {
                start: covered,
                end: duration,
            });
        }
        issues
    }

    /// Group node placing every scene at its window, in declaration order.
    ///
    /// Every scheduled scene needs a node and every node needs a schedule entry.
    pub fn assemble(&self, mut scenes: IndexMap<String, Node>) -> CadenceResult<Node> {
        self.validate()?;
        let mut children = Vec::with_capacity(self.entries.len());
        for (name, entry) in &self.entries {
            let node = scenes.shift_remove(name).ok_or_else(|| {
                CadenceError::validation(format!("scheduled scene '{name}' has no renderer"))
            })?;
            children.push(place(name, entry, node));
        }
        if let Some(extra) = scenes.keys().next() {
            return Err(CadenceError::validation(format!(
                "scene '{extra}' is not in the schedule"
            )));
        }
        Ok(Node::group(children))
    }
}

fn place(name: &str, entry: &ScheduleEntry, node: Node) -> Node {
    let start = i64::try_from(entry.start).unwrap_or(i64::MAX);
    if node.start == 0 && node.duration.is_none() {
        Node {
            name: Some(name.to_owned()),
            start,
            duration: Some(entry.duration),
            kind: node.kind,
        }
    } else {
        Node {
            name: Some(name.to_owned()),
            start,
            duration: Some(entry.duration),
            kind: NodeKind::Group {
                children: vec![node],
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/schedule.rs"]
mod tests;
