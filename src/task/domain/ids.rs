//! Identifier types for the task domain.

use crate::identifier::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a task.
    TaskId
}

uuid_identifier! {
    /// Unique identifier for a focus session within a task.
    SessionId
}

uuid_identifier! {
    /// Unique identifier for a comment within a task.
    CommentId
}
