//! In-memory repository for sprints.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sprint::{
    domain::{Sprint, SprintId},
    ports::{SprintRepository, SprintRepositoryError, SprintRepositoryResult},
};

/// Thread-safe in-memory sprint repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySprintRepository {
    sprints: Arc<RwLock<HashMap<SprintId, Sprint>>>,
}

impl InMemorySprintRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> SprintRepositoryError {
    SprintRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted_by_start(sprints: impl Iterator<Item = Sprint>) -> Vec<Sprint> {
    let mut ordered: Vec<Sprint> = sprints.collect();
    ordered.sort_by_key(Sprint::start_date);
    ordered
}

#[async_trait]
impl SprintRepository for InMemorySprintRepository {
    async fn save(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let mut sprints = self.sprints.write().map_err(lock_error)?;
        let week_taken = sprints.values().any(|existing| {
            existing.id() != sprint.id() && existing.start_date() == sprint.start_date()
        });
        if week_taken {
            return Err(SprintRepositoryError::DuplicateStartDate(
                sprint.start_date(),
            ));
        }
        sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>> {
        let sprints = self.sprints.read().map_err(lock_error)?;
        Ok(sprints.get(&id).cloned())
    }

    async fn find_all(&self) -> SprintRepositoryResult<Vec<Sprint>> {
        let sprints = self.sprints.read().map_err(lock_error)?;
        Ok(sorted_by_start(sprints.values().cloned()))
    }

    async fn find_current(&self, today: NaiveDate) -> SprintRepositoryResult<Option<Sprint>> {
        let sprints = self.sprints.read().map_err(lock_error)?;
        Ok(sprints
            .values()
            .find(|sprint| sprint.contains(today))
            .cloned())
    }

    async fn find_upcoming(&self, today: NaiveDate) -> SprintRepositoryResult<Vec<Sprint>> {
        let sprints = self.sprints.read().map_err(lock_error)?;
        Ok(sorted_by_start(
            sprints
                .values()
                .filter(|sprint| sprint.is_upcoming(today))
                .cloned(),
        ))
    }

    async fn find_by_start_date(
        &self,
        start_date: NaiveDate,
    ) -> SprintRepositoryResult<Option<Sprint>> {
        let sprints = self.sprints.read().map_err(lock_error)?;
        Ok(sprints
            .values()
            .find(|sprint| sprint.start_date() == start_date)
            .cloned())
    }

    async fn delete(&self, id: SprintId) -> SprintRepositoryResult<()> {
        let mut sprints = self.sprints.write().map_err(lock_error)?;
        if sprints.remove(&id).is_none() {
            return Err(SprintRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
