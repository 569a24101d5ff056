//! Routine management and selection over stored routines, tasks and tags.

use super::{ActiveRoutineDeterminer, RoutineTaskFilter};
use crate::error::ErrorKind;
use crate::routine::{
    domain::{
        ACTIVATION_FIELD, ActivationContext, Routine, RoutineDomainError, RoutineDraft,
        RoutineId, TASK_FILTER_FIELD,
    },
    ports::{
        ExpressionError, ExpressionEvaluator, ExpressionValidation, RoutineRepository,
        RoutineRepositoryError,
    },
};
use crate::tag::ports::{TagRepository, TagRepositoryError};
use crate::task::{
    domain::{Task, TaskLocation},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDateTime;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for routine operations.
#[derive(Debug, Error)]
pub enum RoutineServiceError {
    /// Domain validation failed or a routine was missing.
    #[error(transparent)]
    Domain(#[from] RoutineDomainError),
    /// Routine repository operation failed.
    #[error(transparent)]
    Repository(#[from] RoutineRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Tag lookup failed.
    #[error(transparent)]
    Tags(#[from] TagRepositoryError),
    /// The evaluator failed on a stored expression.
    #[error(transparent)]
    Expression(#[from] ExpressionError),
    /// The evaluator rejected an expression.
    #[error("invalid {field} expression '{expression}': {reason}")]
    InvalidExpression {
        /// Which expression was rejected.
        field: &'static str,
        /// Rejected expression.
        expression: String,
        /// Evaluator-provided reason.
        reason: String,
    },
}

impl RoutineServiceError {
    /// Returns the error classification, or `None` for infrastructure
    /// failures outside the taxonomy.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Domain(err) => Some(err.kind()),
            Self::Repository(RoutineRepositoryError::NotFound(_)) => Some(ErrorKind::NotFound),
            Self::Repository(RoutineRepositoryError::DuplicateName(_))
            | Self::InvalidExpression { .. }
            | Self::Expression(ExpressionError::Invalid { .. }) => Some(ErrorKind::Validation),
            Self::Repository(RoutineRepositoryError::Persistence(_))
            | Self::Tasks(_)
            | Self::Tags(_)
            | Self::Expression(ExpressionError::Evaluation { .. }) => None,
        }
    }
}

/// Result type for routine service operations.
pub type RoutineServiceResult<T> = Result<T, RoutineServiceError>;

/// Routine orchestration service.
#[derive(Clone)]
pub struct RoutineService<R, E, T, G, C>
where
    R: RoutineRepository,
    E: ExpressionEvaluator,
    T: TaskRepository,
    G: TagRepository,
    C: Clock + Send + Sync,
{
    routines: Arc<R>,
    evaluator: Arc<E>,
    tasks: Arc<T>,
    tags: Arc<G>,
    clock: Arc<C>,
}

impl<R, E, T, G, C> RoutineService<R, E, T, G, C>
where
    R: RoutineRepository,
    E: ExpressionEvaluator,
    T: TaskRepository,
    G: TagRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new routine service.
    #[must_use]
    pub const fn new(
        routines: Arc<R>,
        evaluator: Arc<E>,
        tasks: Arc<T>,
        tags: Arc<G>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            routines,
            evaluator,
            tasks,
            tags,
            clock,
        }
    }

    /// Creates and stores a routine after checking both expressions with
    /// the evaluator.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::Domain`] for blank fields,
    /// [`RoutineServiceError::InvalidExpression`] when the evaluator rejects
    /// an expression, and [`RoutineServiceError::Repository`] when the name
    /// is taken or persistence fails.
    pub async fn create_routine(&self, draft: RoutineDraft) -> RoutineServiceResult<Routine> {
        let routine = Routine::create(draft)?;
        self.ensure_valid(TASK_FILTER_FIELD, routine.task_filter_expression())?;
        self.ensure_valid(ACTIVATION_FIELD, routine.activation_expression())?;
        self.routines.save(&routine).await?;
        info!(
            routine_id = %routine.id(),
            name = routine.name(),
            priority = routine.priority(),
            "routine created"
        );
        Ok(routine)
    }

    /// Finds a routine by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: RoutineId) -> RoutineServiceResult<Option<Routine>> {
        debug!(routine_id = %id, "finding routine");
        Ok(self.routines.find_by_id(id).await?)
    }

    /// Finds a routine by name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::Repository`] when lookup fails.
    pub async fn find_by_name(&self, name: &str) -> RoutineServiceResult<Option<Routine>> {
        debug!(name, "finding routine by name");
        Ok(self.routines.find_by_name(name).await?)
    }

    /// Returns every routine in repository order.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::Repository`] when lookup fails.
    pub async fn list(&self) -> RoutineServiceResult<Vec<Routine>> {
        Ok(self.routines.find_all().await?)
    }

    /// Deletes a routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::Repository`] when the routine does not
    /// exist or persistence fails.
    pub async fn delete(&self, id: RoutineId) -> RoutineServiceResult<()> {
        self.routines.delete(id).await?;
        info!(routine_id = %id, "routine deleted");
        Ok(())
    }

    /// Renames a routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::Domain`] for a blank name or a missing
    /// routine.
    pub async fn rename(&self, id: RoutineId, name: &str) -> RoutineServiceResult<Routine> {
        let mut routine = self.load(id).await?;
        routine.rename(name)?;
        self.routines.save(&routine).await?;
        info!(routine_id = %id, name = routine.name(), "routine renamed");
        Ok(routine)
    }

    /// Replaces a routine's priority.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::Domain`] when the routine is missing.
    pub async fn set_priority(&self, id: RoutineId, priority: i32) -> RoutineServiceResult<Routine> {
        let mut routine = self.load(id).await?;
        routine.set_priority(priority);
        self.routines.save(&routine).await?;
        info!(routine_id = %id, priority, "routine priority updated");
        Ok(routine)
    }

    /// Replaces a routine's task filter expression.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::InvalidExpression`] when the evaluator
    /// rejects the expression.
    pub async fn update_task_filter(
        &self,
        id: RoutineId,
        expression: &str,
    ) -> RoutineServiceResult<Routine> {
        let mut routine = self.load(id).await?;
        routine.update_task_filter(expression)?;
        self.ensure_valid(TASK_FILTER_FIELD, routine.task_filter_expression())?;
        self.routines.save(&routine).await?;
        info!(routine_id = %id, "routine task filter updated");
        Ok(routine)
    }

    /// Replaces a routine's activation expression.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::InvalidExpression`] when the evaluator
    /// rejects the expression.
    pub async fn update_activation(
        &self,
        id: RoutineId,
        expression: &str,
    ) -> RoutineServiceResult<Routine> {
        let mut routine = self.load(id).await?;
        routine.update_activation(expression)?;
        self.ensure_valid(ACTIVATION_FIELD, routine.activation_expression())?;
        self.routines.save(&routine).await?;
        info!(routine_id = %id, "routine activation updated");
        Ok(routine)
    }

    /// Returns the routine active at local time `at`.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::Domain`] when `override_id` names no
    /// stored routine.
    pub async fn active_routine(
        &self,
        at: NaiveDateTime,
        override_id: Option<RoutineId>,
    ) -> RoutineServiceResult<Option<Routine>> {
        let routines = self.routines.find_all().await?;
        let context = ActivationContext::at(at);
        let determiner = ActiveRoutineDeterminer::new(Arc::clone(&self.evaluator));
        let active = determiner.determine(&routines, &context, override_id)?;
        Ok(active.cloned())
    }

    /// Returns the routine active now, in the clock's local time.
    ///
    /// # Errors
    ///
    /// See [`Self::active_routine`].
    pub async fn active_routine_now(
        &self,
        override_id: Option<RoutineId>,
    ) -> RoutineServiceResult<Option<Routine>> {
        let now = self.clock.local().naive_local();
        self.active_routine(now, override_id).await
    }

    /// Returns the non-template tasks at `location` that the routine's
    /// filter selects, in repository order.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineServiceError::Domain`] when the routine is missing
    /// and [`RoutineServiceError::Expression`] when its filter does not
    /// compile.
    pub async fn tasks_for_routine(
        &self,
        id: RoutineId,
        location: TaskLocation,
    ) -> RoutineServiceResult<Vec<Task>> {
        let routine = self.load(id).await?;
        let tasks: Vec<Task> = self
            .tasks
            .find_by_location(location)
            .await?
            .into_iter()
            .filter(|task| !task.is_template())
            .collect();
        let catalogue = self.tags.find_all().await?;

        let filter = RoutineTaskFilter::new(Arc::clone(&self.evaluator));
        let matching: Vec<Task> = filter
            .apply(&routine, &tasks, &catalogue)?
            .into_iter()
            .cloned()
            .collect();
        debug!(
            routine_id = %id,
            %location,
            matched = matching.len(),
            considered = tasks.len(),
            "routine tasks filtered"
        );
        Ok(matching)
    }

    fn ensure_valid(&self, field: &'static str, expression: &str) -> RoutineServiceResult<()> {
        match self.evaluator.validate(expression) {
            ExpressionValidation::Valid => Ok(()),
            ExpressionValidation::Invalid { reason } => Err(RoutineServiceError::InvalidExpression {
                field,
                expression: expression.to_owned(),
                reason,
            }),
        }
    }

    async fn load(&self, id: RoutineId) -> RoutineServiceResult<Routine> {
        self.routines
            .find_by_id(id)
            .await?
            .ok_or(RoutineServiceError::Domain(RoutineDomainError::RoutineNotFound(id)))
    }
}
