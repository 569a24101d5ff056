//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId, TaskLocation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations must round-trip every task field, including nested
/// sessions and comments, and serialise writes per task identifier.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts or replaces a task.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task.
    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task at `location`, regardless of status.
    async fn find_by_location(&self, location: TaskLocation) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every recurring template.
    async fn find_templates(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
