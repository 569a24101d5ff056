//! Comments attached to a task.

use super::{CommentId, TaskDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin of a comment.
///
/// Justification kinds are written by the system when a task is skipped
/// for the day or canceled; they are never edited or deleted directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    /// Freeform user note.
    Note,
    /// Justification recorded by a skip-for-day.
    SkipJustification,
    /// Justification recorded by a cancellation.
    CancelJustification,
}

impl CommentKind {
    /// Returns whether the comment is system-managed.
    #[must_use]
    pub const fn is_system(self) -> bool {
        !matches!(self, Self::Note)
    }
}

/// A comment on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    content: String,
    kind: CommentKind,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Creates a comment of the given kind.
    pub(super) fn new(
        kind: CommentKind,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            id: CommentId::new(),
            content: normalize_content(content)?,
            kind,
            created_at: now,
            updated_at: None,
        })
    }

    /// Replaces the content and stamps `updated_at`.
    pub(super) fn edit(&mut self, content: &str, now: DateTime<Utc>) -> Result<(), TaskDomainError> {
        self.content = normalize_content(content)?;
        self.updated_at = Some(now);
        Ok(())
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the comment content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the comment kind.
    #[must_use]
    pub const fn kind(&self) -> CommentKind {
        self.kind
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last edit timestamp, if edited.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns whether this comment justifies a skip-for-day.
    #[must_use]
    pub const fn is_skip_justification(&self) -> bool {
        matches!(self.kind, CommentKind::SkipJustification)
    }

    /// Returns whether this comment justifies a cancellation.
    #[must_use]
    pub const fn is_cancel_justification(&self) -> bool {
        matches!(self.kind, CommentKind::CancelJustification)
    }
}

fn normalize_content(content: &str) -> Result<String, TaskDomainError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyComment);
    }
    Ok(trimmed.to_owned())
}
