//! Sprint capacity health.
//!
//! For every tag that appears in a non-canceled task scheduled into the
//! sprint, scheduled points are compared against the sprint's capacity for
//! that tag. Verdicts are computed in integer arithmetic against the
//! configured percentage thresholds, so boundary values classify exactly.

use crate::config::HealthThresholds;
use crate::sprint::domain::{Sprint, SprintId};
use crate::tag::domain::{Tag, TagId};
use crate::task::domain::{Task, TaskLocation, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Health verdict, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Scheduled work fits comfortably.
    #[default]
    OnTrack,
    /// Scheduled work is close to or at capacity.
    AtRisk,
    /// Scheduled work exceeds capacity.
    OffTrack,
}

impl HealthStatus {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::AtRisk => "at_risk",
            Self::OffTrack => "off_track",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health of one tag within a sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagHealth {
    tag_id: TagId,
    scheduled: u64,
    capacity: u32,
    ratio: Option<f64>,
    health: HealthStatus,
}

impl TagHealth {
    /// Returns the tag identifier.
    #[must_use]
    pub const fn tag_id(&self) -> TagId {
        self.tag_id
    }

    /// Returns the points scheduled for the tag.
    #[must_use]
    pub const fn scheduled(&self) -> u64 {
        self.scheduled
    }

    /// Returns the effective capacity for the tag.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns `scheduled / capacity`, or `None` when capacity is zero.
    #[must_use]
    pub const fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    /// Returns the verdict for the tag.
    #[must_use]
    pub const fn health(&self) -> HealthStatus {
        self.health
    }
}

/// Per-tag and overall health of a sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintHealthReport {
    sprint_id: SprintId,
    tags: Vec<TagHealth>,
    overall: HealthStatus,
}

impl SprintHealthReport {
    /// Returns the sprint the report describes.
    #[must_use]
    pub const fn sprint_id(&self) -> SprintId {
        self.sprint_id
    }

    /// Returns per-tag health, ordered by tag id.
    #[must_use]
    pub fn tags(&self) -> &[TagHealth] {
        &self.tags
    }

    /// Returns health for a single tag, if it has scheduled work.
    #[must_use]
    pub fn tag(&self, tag_id: TagId) -> Option<&TagHealth> {
        self.tags.iter().find(|entry| entry.tag_id == tag_id)
    }

    /// Returns the most severe tag verdict.
    #[must_use]
    pub const fn overall(&self) -> HealthStatus {
        self.overall
    }
}

/// Stateless sprint health calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SprintHealthCalculator {
    thresholds: HealthThresholds,
}

impl SprintHealthCalculator {
    /// Creates a calculator using `thresholds`.
    #[must_use]
    pub const fn new(thresholds: HealthThresholds) -> Self {
        Self { thresholds }
    }

    /// Returns the configured thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> HealthThresholds {
        self.thresholds
    }

    /// Builds the health report for `sprint`.
    ///
    /// `tasks` may contain tasks from anywhere; only non-canceled tasks
    /// located in the sprint are counted. Tags absent from `tags` have a
    /// default capacity of zero.
    #[must_use]
    pub fn calculate(&self, sprint: &Sprint, tasks: &[Task], tags: &[Tag]) -> SprintHealthReport {
        let location = TaskLocation::Sprint(sprint.id());
        let mut scheduled: BTreeMap<TagId, u64> = BTreeMap::new();
        for task in tasks
            .iter()
            .filter(|task| task.location() == location && task.status() != TaskStatus::Canceled)
        {
            for (tag_id, points) in task.tag_points().iter() {
                *scheduled.entry(tag_id).or_default() += u64::from(points.value());
            }
        }

        let defaults: HashMap<TagId, u32> = tags
            .iter()
            .map(|tag| (tag.id(), tag.default_capacity()))
            .collect();

        let entries: Vec<TagHealth> = scheduled
            .into_iter()
            .map(|(tag_id, points)| {
                let default_capacity = defaults.get(&tag_id).copied().unwrap_or_default();
                let capacity = sprint.capacity_for(tag_id, default_capacity);
                TagHealth {
                    tag_id,
                    scheduled: points,
                    capacity,
                    ratio: ratio(points, capacity),
                    health: self.classify(points, capacity),
                }
            })
            .collect();

        let overall = entries
            .iter()
            .map(TagHealth::health)
            .max()
            .unwrap_or_default();

        SprintHealthReport {
            sprint_id: sprint.id(),
            tags: entries,
            overall,
        }
    }

    /// Classifies `scheduled` points against `capacity`.
    ///
    /// A zero capacity is on track only when nothing is scheduled.
    #[must_use]
    pub fn classify(&self, scheduled: u64, capacity: u32) -> HealthStatus {
        if capacity == 0 {
            return if scheduled == 0 {
                HealthStatus::OnTrack
            } else {
                HealthStatus::OffTrack
            };
        }
        let load = u128::from(scheduled) * 100;
        let capacity_wide = u128::from(capacity);
        if load > capacity_wide * u128::from(self.thresholds.off_track_percent) {
            HealthStatus::OffTrack
        } else if load > capacity_wide * u128::from(self.thresholds.at_risk_percent) {
            HealthStatus::AtRisk
        } else {
            HealthStatus::OnTrack
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "the ratio is informational; verdicts use integer comparisons"
)]
fn ratio(scheduled: u64, capacity: u32) -> Option<f64> {
    (capacity != 0).then(|| scheduled as f64 / f64::from(capacity))
}
