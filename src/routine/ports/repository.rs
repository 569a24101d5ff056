//! Repository port for routine persistence and lookup.

use crate::routine::domain::{Routine, RoutineId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for routine repository operations.
pub type RoutineRepositoryResult<T> = Result<T, RoutineRepositoryError>;

/// Routine persistence contract.
///
/// `find_all` must return routines in a stable order; routine selection
/// breaks priority ties by that order.
#[async_trait]
pub trait RoutineRepository: Send + Sync {
    /// Inserts or replaces a routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineRepositoryError::DuplicateName`] when another routine
    /// already uses the same name.
    async fn save(&self, routine: &Routine) -> RoutineRepositoryResult<()>;

    /// Finds a routine by identifier.
    async fn find_by_id(&self, id: RoutineId) -> RoutineRepositoryResult<Option<Routine>>;

    /// Returns every routine in insertion order.
    async fn find_all(&self) -> RoutineRepositoryResult<Vec<Routine>>;

    /// Finds a routine by name, ignoring ASCII case.
    async fn find_by_name(&self, name: &str) -> RoutineRepositoryResult<Option<Routine>>;

    /// Deletes a routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineRepositoryError::NotFound`] when the routine does not
    /// exist.
    async fn delete(&self, id: RoutineId) -> RoutineRepositoryResult<()>;
}

/// Errors returned by routine repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RoutineRepositoryError {
    /// The routine was not found.
    #[error("routine not found: {0}")]
    NotFound(RoutineId),

    /// Another routine already uses this name.
    #[error("duplicate routine name: {0}")]
    DuplicateName(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoutineRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
