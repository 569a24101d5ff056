//! Service layer for task creation and lifecycle operations.
//!
//! Every mutating operation follows the same shape: load the aggregate,
//! apply one domain operation, persist the result. A failed domain
//! operation leaves the stored task untouched.

use crate::error::ErrorKind;
use crate::sprint::domain::SprintId;
use crate::tag::domain::TagId;
use crate::task::{
    domain::{
        CommentId, FocusLevel, ManualSession, SessionId, TagPoints, Task, TaskDomainError,
        TaskDraft, TaskId, TaskLocation,
    },
    ports::{
        RecurrenceCalculator, RecurrenceError, RuleValidation, TaskRepository,
        TaskRepositoryError,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    tag_points: Vec<(TagId, u32)>,
    description: Option<String>,
    location: TaskLocation,
    recurrence: Option<String>,
    order: i64,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, tag_points: impl IntoIterator<Item = (TagId, u32)>) -> Self {
        Self {
            title: title.into(),
            tag_points: tag_points.into_iter().collect(),
            description: None,
            location: TaskLocation::Backlog,
            recurrence: None,
            order: 0,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial location.
    #[must_use]
    pub const fn with_location(mut self, location: TaskLocation) -> Self {
        self.location = location;
        self
    }

    /// Sets a recurrence rule, creating a template.
    #[must_use]
    pub fn with_recurrence(mut self, rule: impl Into<String>) -> Self {
        self.recurrence = Some(rule.into());
        self
    }

    /// Sets the manual ordering key.
    #[must_use]
    pub const fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The recurrence engine failed.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
    /// No task exists with the identifier.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The recurrence engine rejected a rule.
    #[error("invalid recurrence rule '{rule}': {reason}")]
    InvalidRecurrence {
        /// Rejected rule.
        rule: String,
        /// Engine-provided reason.
        reason: String,
    },
}

impl TaskLifecycleError {
    /// Returns the error classification, or `None` for infrastructure
    /// failures outside the taxonomy.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Domain(err) => Some(err.kind()),
            Self::TaskNotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                Some(ErrorKind::NotFound)
            }
            Self::InvalidRecurrence { .. } | Self::Recurrence(RecurrenceError::InvalidRule { .. }) => {
                Some(ErrorKind::Validation)
            }
            Self::Repository(TaskRepositoryError::Persistence(_)) => None,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: RecurrenceCalculator,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    recurrence: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: RecurrenceCalculator,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, recurrence: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            recurrence,
            clock,
        }
    }

    /// Creates and stores a task.
    ///
    /// Recurrence rules are checked with the recurrence engine before the
    /// task is built.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidRecurrence`] when the engine
    /// rejects the rule, [`TaskLifecycleError::Domain`] when validation
    /// fails, or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            title,
            tag_points,
            description,
            location,
            recurrence,
            order,
        } = request;

        let mut draft = TaskDraft::new(title, TagPoints::new(tag_points)?)
            .with_location(location)
            .with_order(order);
        if let Some(text) = description {
            draft = draft.with_description(text);
        }
        if let Some(rule) = recurrence {
            self.ensure_valid_rule(&rule)?;
            draft = draft.with_recurrence(rule);
        }

        let task = Task::create(draft, &*self.clock)?;
        self.repository.save(&task).await?;
        info!(task_id = %task.id(), location = %task.location(), template = task.is_template(), "task created");
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns every task at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn tasks_at(&self, location: TaskLocation) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.repository.find_by_location(location).await?;
        debug!(%location, count = tasks.len(), "loaded tasks by location");
        Ok(tasks)
    }

    /// Completes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] when the transition is not allowed.
    pub async fn complete(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        self.apply(id, "complete", |task| task.complete(clock))
            .await
            .map(|(task, ())| task)
    }

    /// Cancels a task with a justification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for blank justifications or disallowed
    /// transitions.
    pub async fn cancel(&self, id: TaskId, justification: &str) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        self.apply(id, "cancel", |task| task.cancel(justification, clock))
            .await
            .map(|(task, ())| task)
    }

    /// Deprioritises a task once.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for inactive tasks.
    pub async fn skip_for_now(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.apply(id, "skip_for_now", Task::skip_for_now)
            .await
            .map(|(task, ())| task)
    }

    /// Hides a task for the rest of the day.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for blank justifications or inactive
    /// tasks.
    pub async fn skip_for_day(&self, id: TaskId, justification: &str) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        self.apply(id, "skip_for_day", |task| task.skip_for_day(justification, clock))
            .await
            .map(|(task, ())| task)
    }

    /// Returns a day-skipped task to the focus queue.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] when the task is not skipped for the
    /// day.
    pub async fn return_skipped(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.apply(id, "return_skipped", Task::return_skipped)
            .await
            .map(|(task, ())| task)
    }

    /// Clears any skip state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks.
    pub async fn clear_skip_state(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.apply(id, "clear_skip_state", |task| {
            task.clear_skip_state();
            Ok(())
        })
        .await
        .map(|(task, ())| task)
    }

    /// Schedules a task into a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for inactive tasks or templates.
    pub async fn move_to_sprint(&self, id: TaskId, sprint_id: SprintId) -> TaskLifecycleResult<Task> {
        self.apply(id, "move_to_sprint", |task| task.move_to_sprint(sprint_id))
            .await
            .map(|(task, ())| task)
    }

    /// Returns a task to the backlog.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for inactive tasks or templates.
    pub async fn move_to_backlog(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.apply(id, "move_to_backlog", Task::move_to_backlog)
            .await
            .map(|(task, ())| task)
    }

    /// Replaces a task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for blank titles or inactive tasks.
    pub async fn update_title(&self, id: TaskId, title: &str) -> TaskLifecycleResult<Task> {
        self.apply(id, "update_title", |task| task.update_title(title))
            .await
            .map(|(task, ())| task)
    }

    /// Replaces or clears a task description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for inactive tasks.
    pub async fn update_description(
        &self,
        id: TaskId,
        description: Option<&str>,
    ) -> TaskLifecycleResult<Task> {
        self.apply(id, "update_description", |task| {
            task.update_description(description)
        })
        .await
        .map(|(task, ())| task)
    }

    /// Replaces a task's point allocation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for non-Fibonacci values or
    /// inactive tasks, and [`TaskLifecycleError::TaskNotFound`] for unknown
    /// tasks.
    pub async fn update_tag_points(
        &self,
        id: TaskId,
        tag_points: impl IntoIterator<Item = (TagId, u32)>,
    ) -> TaskLifecycleResult<Task> {
        let allocation = TagPoints::new(tag_points)?;
        self.apply(id, "update_tag_points", |task| {
            task.update_tag_points(allocation)
        })
        .await
        .map(|(task, ())| task)
    }

    /// Replaces a task's manual ordering key.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for inactive tasks.
    pub async fn reorder(&self, id: TaskId, order: i64) -> TaskLifecycleResult<Task> {
        self.apply(id, "reorder", |task| task.reorder(order))
            .await
            .map(|(task, ())| task)
    }

    /// Sets, replaces, or removes a task's recurrence rule.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidRecurrence`] when the engine
    /// rejects the rule and [`TaskLifecycleError::Domain`] when the task
    /// cannot become a template.
    pub async fn set_recurrence(&self, id: TaskId, rule: Option<&str>) -> TaskLifecycleResult<Task> {
        if let Some(candidate) = rule {
            self.ensure_valid_rule(candidate.trim())?;
        }
        self.apply(id, "set_recurrence", |task| task.update_recurrence(rule))
            .await
            .map(|(task, ())| task)
    }

    /// Adds a freeform comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for blank content.
    pub async fn add_comment(
        &self,
        id: TaskId,
        content: &str,
    ) -> TaskLifecycleResult<(Task, CommentId)> {
        let clock = &*self.clock;
        self.apply(id, "add_comment", |task| task.add_comment(content, clock))
            .await
    }

    /// Edits a freeform comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for unknown, protected, or blank
    /// comments.
    pub async fn edit_comment(
        &self,
        id: TaskId,
        comment_id: CommentId,
        content: &str,
    ) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        self.apply(id, "edit_comment", |task| {
            task.edit_comment(comment_id, content, clock)
        })
        .await
        .map(|(task, ())| task)
    }

    /// Deletes a freeform comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for unknown or protected comments.
    pub async fn remove_comment(
        &self,
        id: TaskId,
        comment_id: CommentId,
    ) -> TaskLifecycleResult<Task> {
        self.apply(id, "remove_comment", |task| {
            task.remove_comment(comment_id).map(|_| ())
        })
        .await
        .map(|(task, ())| task)
    }

    /// Starts a focus session.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] when a session cannot start.
    pub async fn start_session(
        &self,
        id: TaskId,
        duration_minutes: u32,
    ) -> TaskLifecycleResult<(Task, SessionId)> {
        let clock = &*self.clock;
        self.apply(id, "start_session", |task| {
            task.start_session(duration_minutes, clock)
        })
        .await
    }

    /// Completes a running session.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for unknown or ended sessions.
    pub async fn end_session(
        &self,
        id: TaskId,
        session_id: SessionId,
        focus_level: FocusLevel,
    ) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        self.apply(id, "end_session", |task| {
            task.end_session(session_id, focus_level, clock)
        })
        .await
        .map(|(task, ())| task)
    }

    /// Abandons a running session.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for unknown or ended sessions.
    pub async fn abandon_session(
        &self,
        id: TaskId,
        session_id: SessionId,
    ) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        self.apply(id, "abandon_session", |task| {
            task.abandon_session(session_id, clock)
        })
        .await
        .map(|(task, ())| task)
    }

    /// Records a completed session after the fact.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] for inactive tasks or invalid ranges.
    pub async fn add_manual_session(
        &self,
        id: TaskId,
        request: ManualSession,
    ) -> TaskLifecycleResult<(Task, SessionId)> {
        self.apply(id, "add_manual_session", |task| {
            task.add_manual_session(request)
        })
        .await
    }

    /// Spawns and stores a new instance of a recurring template.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] when the task is not an active
    /// template.
    pub async fn spawn_instance(&self, template_id: TaskId) -> TaskLifecycleResult<Task> {
        let template = self.load(template_id).await?;
        let instance = template.spawn_instance(&*self.clock)?;
        self.repository.save(&instance).await?;
        info!(template_id = %template_id, task_id = %instance.id(), "spawned recurring instance");
        Ok(instance)
    }

    /// Returns every recurring template.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn templates(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_templates().await?)
    }

    /// Returns a template's next occurrence after the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks,
    /// [`TaskLifecycleError::Domain`] when the task is not a template, and
    /// [`TaskLifecycleError::Recurrence`] when the engine fails.
    pub async fn next_occurrence(
        &self,
        template_id: TaskId,
    ) -> TaskLifecycleResult<Option<DateTime<Utc>>> {
        let template = self.load(template_id).await?;
        let rule = template
            .recurrence()
            .ok_or(TaskDomainError::NotATemplate(template_id))?;
        Ok(self.recurrence.next_occurrence(rule, self.clock.utc())?)
    }

    /// Returns a human-readable description of a template's rule.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks,
    /// [`TaskLifecycleError::Domain`] when the task is not a template, and
    /// [`TaskLifecycleError::Recurrence`] when the engine fails.
    pub async fn describe_recurrence(&self, template_id: TaskId) -> TaskLifecycleResult<String> {
        let template = self.load(template_id).await?;
        let rule = template
            .recurrence()
            .ok_or(TaskDomainError::NotATemplate(template_id))?;
        Ok(self.recurrence.description(rule)?)
    }

    fn ensure_valid_rule(&self, rule: &str) -> TaskLifecycleResult<()> {
        match self.recurrence.validate(rule) {
            RuleValidation::Valid => Ok(()),
            RuleValidation::Invalid { reason } => Err(TaskLifecycleError::InvalidRecurrence {
                rule: rule.to_owned(),
                reason,
            }),
        }
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(id))
    }

    /// Loads a task, applies one domain operation, and persists the result.
    async fn apply<T>(
        &self,
        id: TaskId,
        action: &'static str,
        operation: impl FnOnce(&mut Task) -> Result<T, TaskDomainError>,
    ) -> TaskLifecycleResult<(Task, T)> {
        let mut task = self.load(id).await?;
        let output = operation(&mut task)?;
        self.repository.save(&task).await?;
        info!(task_id = %id, action, status = %task.status(), "task updated");
        Ok((task, output))
    }
}
