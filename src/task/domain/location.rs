//! Where a task currently lives.

use crate::sprint::domain::SprintId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task location: the unscheduled backlog or a specific sprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "sprint_id", rename_all = "snake_case")]
pub enum TaskLocation {
    /// Unscheduled work.
    #[default]
    Backlog,
    /// Scheduled into a sprint.
    Sprint(SprintId),
}

impl TaskLocation {
    /// Returns the sprint identifier when scheduled.
    #[must_use]
    pub const fn sprint_id(self) -> Option<SprintId> {
        match self {
            Self::Backlog => None,
            Self::Sprint(sprint_id) => Some(sprint_id),
        }
    }

    /// Returns whether the location is the backlog.
    #[must_use]
    pub const fn is_backlog(self) -> bool {
        matches!(self, Self::Backlog)
    }

    /// Returns the location kind as a string.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Sprint(_) => "sprint",
        }
    }
}

impl fmt::Display for TaskLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backlog => f.write_str("backlog"),
            Self::Sprint(sprint_id) => write!(f, "sprint:{sprint_id}"),
        }
    }
}
