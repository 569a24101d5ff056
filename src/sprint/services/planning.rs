//! Sprint planning: creating weekly sprints, managing capacity overrides,
//! and producing health reports from stored tasks and tags.

use super::{SprintHealthCalculator, SprintHealthReport};
use crate::config::HealthThresholds;
use crate::error::ErrorKind;
use crate::sprint::{
    domain::{Sprint, SprintDomainError, SprintId},
    ports::{SprintRepository, SprintRepositoryError},
};
use crate::tag::{
    domain::TagId,
    ports::{TagRepository, TagRepositoryError},
};
use crate::task::{
    domain::TaskLocation,
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for sprint planning.
#[derive(Debug, Error)]
pub enum SprintPlanningError {
    /// Sprint construction failed.
    #[error(transparent)]
    Domain(#[from] SprintDomainError),
    /// Sprint repository operation failed.
    #[error(transparent)]
    Repository(#[from] SprintRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Tag lookup failed.
    #[error(transparent)]
    Tags(#[from] TagRepositoryError),
    /// No sprint exists with the identifier.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),
}

impl SprintPlanningError {
    /// Returns the error classification, or `None` for infrastructure
    /// failures outside the taxonomy.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Domain(err) => Some(err.kind()),
            Self::SprintNotFound(_)
            | Self::Repository(SprintRepositoryError::NotFound(_))
            | Self::Tasks(TaskRepositoryError::NotFound(_))
            | Self::Tags(TagRepositoryError::NotFound(_)) => Some(ErrorKind::NotFound),
            Self::Repository(SprintRepositoryError::DuplicateStartDate(_))
            | Self::Tags(TagRepositoryError::DuplicateName(_)) => Some(ErrorKind::Validation),
            Self::Repository(SprintRepositoryError::Persistence(_))
            | Self::Tasks(TaskRepositoryError::Persistence(_))
            | Self::Tags(TagRepositoryError::Persistence(_)) => None,
        }
    }
}

/// Result type for sprint planning operations.
pub type SprintPlanningResult<T> = Result<T, SprintPlanningError>;

/// Sprint planning orchestration service.
#[derive(Clone)]
pub struct SprintPlanningService<S, T, G>
where
    S: SprintRepository,
    T: TaskRepository,
    G: TagRepository,
{
    sprints: Arc<S>,
    tasks: Arc<T>,
    tags: Arc<G>,
    calculator: SprintHealthCalculator,
}

impl<S, T, G> SprintPlanningService<S, T, G>
where
    S: SprintRepository,
    T: TaskRepository,
    G: TagRepository,
{
    /// Creates a new sprint planning service.
    #[must_use]
    pub const fn new(
        sprints: Arc<S>,
        tasks: Arc<T>,
        tags: Arc<G>,
        thresholds: HealthThresholds,
    ) -> Self {
        Self {
            sprints,
            tasks,
            tags,
            calculator: SprintHealthCalculator::new(thresholds),
        }
    }

    /// Creates and stores a sprint starting on `start_date`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::Domain`] unless `start_date` is a
    /// Sunday and [`SprintPlanningError::Repository`] when the week already
    /// has a sprint.
    pub async fn create_sprint(&self, start_date: NaiveDate) -> SprintPlanningResult<Sprint> {
        let sprint = Sprint::create(start_date)?;
        self.sprints.save(&sprint).await?;
        info!(sprint_id = %sprint.id(), %start_date, "sprint created");
        Ok(sprint)
    }

    /// Returns the sprint whose week contains `date`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::Repository`] when lookup or
    /// persistence fails.
    pub async fn sprint_for_date(&self, date: NaiveDate) -> SprintPlanningResult<Sprint> {
        let start_date = Sprint::week_start(date)?;
        if let Some(existing) = self.sprints.find_by_start_date(start_date).await? {
            debug!(sprint_id = %existing.id(), %date, "found sprint for date");
            return Ok(existing);
        }
        self.create_sprint(start_date).await
    }

    /// Finds a sprint by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: SprintId) -> SprintPlanningResult<Option<Sprint>> {
        Ok(self.sprints.find_by_id(id).await?)
    }

    /// Returns the sprint containing `today`, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::Repository`] when lookup fails.
    pub async fn current_sprint(&self, today: NaiveDate) -> SprintPlanningResult<Option<Sprint>> {
        Ok(self.sprints.find_current(today).await?)
    }

    /// Returns sprints starting after `today`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::Repository`] when lookup fails.
    pub async fn upcoming_sprints(&self, today: NaiveDate) -> SprintPlanningResult<Vec<Sprint>> {
        Ok(self.sprints.find_upcoming(today).await?)
    }

    /// Overrides a tag's capacity for one sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`] for unknown sprints.
    pub async fn set_capacity_override(
        &self,
        id: SprintId,
        tag_id: TagId,
        capacity: u32,
    ) -> SprintPlanningResult<Sprint> {
        let mut sprint = self.load(id).await?;
        sprint.set_capacity_override(tag_id, capacity);
        self.sprints.save(&sprint).await?;
        info!(sprint_id = %id, %tag_id, capacity, "capacity override set");
        Ok(sprint)
    }

    /// Removes a tag's capacity override from one sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`] for unknown sprints.
    pub async fn clear_capacity_override(
        &self,
        id: SprintId,
        tag_id: TagId,
    ) -> SprintPlanningResult<Sprint> {
        let mut sprint = self.load(id).await?;
        let previous = sprint.clear_capacity_override(tag_id);
        self.sprints.save(&sprint).await?;
        info!(sprint_id = %id, %tag_id, ?previous, "capacity override cleared");
        Ok(sprint)
    }

    /// Builds the health report for a stored sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`] for unknown sprints
    /// and repository errors when tasks or tags cannot be loaded.
    pub async fn health_report(&self, id: SprintId) -> SprintPlanningResult<SprintHealthReport> {
        let sprint = self.load(id).await?;
        let tasks = self.tasks.find_by_location(TaskLocation::Sprint(id)).await?;
        let tags = self.tags.find_all().await?;
        let report = self.calculator.calculate(&sprint, &tasks, &tags);
        info!(
            sprint_id = %id,
            overall = %report.overall(),
            tags = report.tags().len(),
            "sprint health calculated"
        );
        Ok(report)
    }

    async fn load(&self, id: SprintId) -> SprintPlanningResult<Sprint> {
        self.sprints
            .find_by_id(id)
            .await?
            .ok_or(SprintPlanningError::SprintNotFound(id))
    }
}
