//! Error types for task domain validation and lifecycle rules.

use super::{CommentId, SessionId, SessionStatus, TaskId, TaskStatus};
use crate::error::ErrorKind;
use crate::tag::domain::TagId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by task construction and task operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A point value is not part of the Fibonacci scale.
    #[error("{0} is not a valid point value, expected one of 1, 2, 3, 5, 8, 13, 21, ...")]
    NonFibonacciPoints(u32),

    /// A tag was assigned a point value outside the Fibonacci scale.
    #[error("tag {tag_id} has invalid point value {value}, expected one of 1, 2, 3, 5, 8, 13, 21, ...")]
    InvalidTagPoints {
        /// Tag carrying the invalid value.
        tag_id: TagId,
        /// Rejected value.
        value: u32,
    },

    /// A skip or cancel justification is empty after trimming.
    #[error("justification must not be empty")]
    EmptyJustification,

    /// Comment content is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyComment,

    /// A recurrence rule is empty after trimming.
    #[error("recurrence rule must not be empty")]
    EmptyRecurrence,

    /// A focus session was requested with a zero duration.
    #[error("session duration must be at least one minute")]
    InvalidSessionDuration,

    /// A manual session ends at or before its start.
    #[error("session end {ended_at} must be after its start {started_at}")]
    InvalidSessionRange {
        /// Requested start.
        started_at: DateTime<Utc>,
        /// Requested end.
        ended_at: DateTime<Utc>,
    },

    /// The requested status transition is not permitted.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The operation requires an active task.
    #[error("task {task_id} is {status}, operation requires an active task")]
    TaskNotActive {
        /// Task being modified.
        task_id: TaskId,
        /// Current status.
        status: TaskStatus,
    },

    /// The task is not skipped for the day.
    #[error("task {0} is not skipped for the day")]
    NotSkippedForDay(TaskId),

    /// The task has no recurrence rule.
    #[error("task {0} is not a recurring template")]
    NotATemplate(TaskId),

    /// Recurring templates stay in the backlog.
    #[error("recurring template {0} cannot be scheduled or moved")]
    TemplateNotSchedulable(TaskId),

    /// Recurring templates never hold a running session.
    #[error("recurring template {0} cannot hold an active session")]
    TemplateCannotHoldSession(TaskId),

    /// Another session is already running on the task.
    #[error("task {task_id} already has session {session_id} in progress")]
    SessionAlreadyInProgress {
        /// Task being modified.
        task_id: TaskId,
        /// Session currently running.
        session_id: SessionId,
    },

    /// The session does not belong to the task.
    #[error("session {session_id} not found on task {task_id}")]
    SessionNotFound {
        /// Task searched.
        task_id: TaskId,
        /// Missing session.
        session_id: SessionId,
    },

    /// The session has already ended.
    #[error("session {session_id} is {status}, expected in_progress")]
    SessionNotInProgress {
        /// Session being ended.
        session_id: SessionId,
        /// Current session status.
        status: SessionStatus,
    },

    /// The comment does not belong to the task.
    #[error("comment {comment_id} not found on task {task_id}")]
    CommentNotFound {
        /// Task searched.
        task_id: TaskId,
        /// Missing comment.
        comment_id: CommentId,
    },

    /// Skip and cancel justifications cannot be edited or deleted directly.
    #[error("comment {0} is a system justification and cannot be modified directly")]
    SystemCommentProtected(CommentId),
}

impl TaskDomainError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SessionNotFound { .. } | Self::CommentNotFound { .. } => ErrorKind::NotFound,
            Self::EmptyTitle
            | Self::NonFibonacciPoints(_)
            | Self::InvalidTagPoints { .. }
            | Self::EmptyJustification
            | Self::EmptyComment
            | Self::EmptyRecurrence
            | Self::InvalidSessionDuration
            | Self::InvalidSessionRange { .. } => ErrorKind::Validation,
            Self::InvalidStatusTransition { .. }
            | Self::TaskNotActive { .. }
            | Self::NotSkippedForDay(_)
            | Self::NotATemplate(_)
            | Self::SessionAlreadyInProgress { .. }
            | Self::SessionNotInProgress { .. } => ErrorKind::InvalidTransition,
            Self::TemplateNotSchedulable(_)
            | Self::TemplateCannotHoldSession(_)
            | Self::SystemCommentProtected(_) => ErrorKind::Forbidden,
        }
    }
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
