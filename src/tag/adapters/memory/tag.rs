//! In-memory repository for tags.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::tag::{
    domain::{Tag, TagId},
    ports::{TagRepository, TagRepositoryError, TagRepositoryResult},
};

/// Thread-safe in-memory tag repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTagRepository {
    tags: Arc<RwLock<HashMap<TagId, Tag>>>,
}

impl InMemoryTagRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TagRepositoryError {
    TagRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn save(&self, tag: &Tag) -> TagRepositoryResult<()> {
        let mut tags = self.tags.write().map_err(lock_error)?;
        let name_taken = tags
            .values()
            .any(|existing| existing.id() != tag.id() && existing.name().matches(tag.name().as_str()));
        if name_taken {
            return Err(TagRepositoryError::DuplicateName(tag.name().clone()));
        }
        tags.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TagId) -> TagRepositoryResult<Option<Tag>> {
        let tags = self.tags.read().map_err(lock_error)?;
        Ok(tags.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> TagRepositoryResult<Option<Tag>> {
        let tags = self.tags.read().map_err(lock_error)?;
        Ok(tags.values().find(|tag| tag.name().matches(name)).cloned())
    }

    async fn find_all(&self) -> TagRepositoryResult<Vec<Tag>> {
        let tags = self.tags.read().map_err(lock_error)?;
        let mut all: Vec<Tag> = tags.values().cloned().collect();
        all.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));
        Ok(all)
    }

    async fn delete(&self, id: TagId) -> TagRepositoryResult<()> {
        let mut tags = self.tags.write().map_err(lock_error)?;
        tags.remove(&id)
            .map(|_| ())
            .ok_or(TagRepositoryError::NotFound(id))
    }
}
