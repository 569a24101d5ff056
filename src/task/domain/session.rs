//! Timed focus sessions attached to a task.

use super::{SessionId, TaskDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// The session is running.
    InProgress,
    /// The session ran to completion.
    Completed,
    /// The session was stopped without completing.
    Abandoned,
}

impl SessionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }

    /// Returns whether the session has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported focus quality, recorded when a session completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusLevel {
    /// Attention wandered for most of the session.
    Distracted,
    /// Ordinary focus.
    Neutral,
    /// Deep focus.
    Focused,
}

/// A focus interval spent on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    status: SessionStatus,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    focus_level: Option<FocusLevel>,
    is_manual: bool,
    note: Option<String>,
    planned_minutes: Option<u32>,
}

/// Parameter object for recording a session after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualSession {
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    focus_level: FocusLevel,
    note: Option<String>,
}

impl ManualSession {
    /// Creates a manual session request.
    #[must_use]
    pub const fn new(
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        focus_level: FocusLevel,
    ) -> Self {
        Self {
            started_at,
            ended_at,
            focus_level,
            note: None,
        }
    }

    /// Attaches a note; blank notes are ignored.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = normalize_note(&note.into());
        self
    }
}

impl Session {
    /// Starts a live session.
    pub(super) fn start(planned_minutes: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            status: SessionStatus::InProgress,
            started_at: now,
            ended_at: None,
            focus_level: None,
            is_manual: false,
            note: None,
            planned_minutes: Some(planned_minutes),
        }
    }

    /// Builds an already-completed, backdated session.
    pub(super) fn manual(request: ManualSession) -> Result<Self, TaskDomainError> {
        let ManualSession {
            started_at,
            ended_at,
            focus_level,
            note,
        } = request;
        if ended_at <= started_at {
            return Err(TaskDomainError::InvalidSessionRange {
                started_at,
                ended_at,
            });
        }
        Ok(Self {
            id: SessionId::new(),
            status: SessionStatus::Completed,
            started_at,
            ended_at: Some(ended_at),
            focus_level: Some(focus_level),
            is_manual: true,
            note,
            planned_minutes: None,
        })
    }

    /// Ends the session with a terminal status.
    pub(super) fn finish(
        &mut self,
        status: SessionStatus,
        focus_level: Option<FocusLevel>,
        now: DateTime<Utc>,
    ) {
        self.status = status;
        self.ended_at = Some(now);
        self.focus_level = match status {
            SessionStatus::Completed => focus_level,
            SessionStatus::InProgress | SessionStatus::Abandoned => None,
        };
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the session status.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns when the session started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns when the session ended, if it has.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Returns the recorded focus level for completed sessions.
    #[must_use]
    pub const fn focus_level(&self) -> Option<FocusLevel> {
        self.focus_level
    }

    /// Returns whether the session was recorded after the fact.
    #[must_use]
    pub const fn is_manual(&self) -> bool {
        self.is_manual
    }

    /// Returns the session note, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the duration requested when the session was started.
    #[must_use]
    pub const fn planned_minutes(&self) -> Option<u32> {
        self.planned_minutes
    }

    /// Returns whether the session is still running.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self.status, SessionStatus::InProgress)
    }

    /// Returns the elapsed whole seconds between start and end.
    ///
    /// Returns `None` while the session is running.
    #[must_use]
    pub fn duration_seconds(&self) -> Option<i64> {
        self.ended_at
            .map(|ended_at| (ended_at - self.started_at).num_seconds())
    }
}

fn normalize_note(note: &str) -> Option<String> {
    let trimmed = note.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
