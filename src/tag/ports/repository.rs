//! Repository port for tag persistence and lookup.

use crate::tag::domain::{Tag, TagId, TagName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tag repository operations.
pub type TagRepositoryResult<T> = Result<T, TagRepositoryError>;

/// Tag persistence contract.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Inserts or replaces a tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::DuplicateName`] when another tag already
    /// uses the same name.
    async fn save(&self, tag: &Tag) -> TagRepositoryResult<()>;

    /// Finds a tag by identifier.
    async fn find_by_id(&self, id: TagId) -> TagRepositoryResult<Option<Tag>>;

    /// Finds a tag by name, ignoring ASCII case.
    async fn find_by_name(&self, name: &str) -> TagRepositoryResult<Option<Tag>>;

    /// Returns every tag, ordered by name.
    async fn find_all(&self) -> TagRepositoryResult<Vec<Tag>>;

    /// Deletes a tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::NotFound`] when the tag does not exist.
    async fn delete(&self, id: TagId) -> TagRepositoryResult<()>;
}

/// Errors returned by tag repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TagRepositoryError {
    /// The tag was not found.
    #[error("tag not found: {0}")]
    NotFound(TagId),

    /// Another tag already uses this name.
    #[error("duplicate tag name: {0}")]
    DuplicateName(TagName),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TagRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
