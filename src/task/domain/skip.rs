//! Focus skip state.

use super::CommentId;
use serde::{Deserialize, Serialize};

/// How a task has been deferred within the focus queue.
///
/// A task holds at most one skip state, so "skipped for now" and "skipped
/// for the day" are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkipState {
    /// Deprioritised once; cleared the next time the focus queue is built.
    ForNow,
    /// Hidden for the rest of the day until explicitly returned.
    ForDay {
        /// Why the task was skipped.
        justification: String,
        /// Comment recording the justification.
        comment_id: CommentId,
        /// Set once the task is surfaced again later in the day.
        returned: bool,
    },
}

impl SkipState {
    /// Returns whether this is a transient skip.
    #[must_use]
    pub const fn is_for_now(&self) -> bool {
        matches!(self, Self::ForNow)
    }

    /// Returns whether the task is hidden from the focus queue.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self, Self::ForDay { returned: false, .. })
    }

    /// Returns the recorded justification for day skips.
    #[must_use]
    pub fn justification(&self) -> Option<&str> {
        match self {
            Self::ForNow => None,
            Self::ForDay { justification, .. } => Some(justification),
        }
    }
}
