//! Repository port for sprint persistence and lookup.

use crate::sprint::domain::{Sprint, SprintId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sprint repository operations.
pub type SprintRepositoryResult<T> = Result<T, SprintRepositoryError>;

/// Sprint persistence contract.
#[async_trait]
pub trait SprintRepository: Send + Sync {
    /// Inserts or replaces a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintRepositoryError::DuplicateStartDate`] when another
    /// sprint already starts on the same day.
    async fn save(&self, sprint: &Sprint) -> SprintRepositoryResult<()>;

    /// Finds a sprint by identifier.
    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>>;

    /// Returns every sprint, ordered by start date.
    async fn find_all(&self) -> SprintRepositoryResult<Vec<Sprint>>;

    /// Returns the sprint containing `today`, if any.
    async fn find_current(&self, today: NaiveDate) -> SprintRepositoryResult<Option<Sprint>>;

    /// Returns sprints starting after `today`, ordered by start date.
    async fn find_upcoming(&self, today: NaiveDate) -> SprintRepositoryResult<Vec<Sprint>>;

    /// Finds the sprint starting on `start_date`.
    async fn find_by_start_date(
        &self,
        start_date: NaiveDate,
    ) -> SprintRepositoryResult<Option<Sprint>>;

    /// Deletes a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintRepositoryError::NotFound`] when the sprint does not
    /// exist.
    async fn delete(&self, id: SprintId) -> SprintRepositoryResult<()>;
}

/// Errors returned by sprint repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SprintRepositoryError {
    /// The sprint was not found.
    #[error("sprint not found: {0}")]
    NotFound(SprintId),

    /// Another sprint already covers the same week.
    #[error("a sprint already starts on {0}")]
    DuplicateStartDate(NaiveDate),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SprintRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
