//! Applying a routine's task filter to a task list.

use crate::routine::{
    domain::{Routine, TaskFilterContext},
    ports::{ExpressionError, ExpressionEvaluator},
};
use crate::tag::domain::Tag;
use crate::task::domain::Task;
use std::sync::Arc;
use tracing::warn;

/// Selects the tasks a routine shows.
#[derive(Clone)]
pub struct RoutineTaskFilter<E>
where
    E: ExpressionEvaluator,
{
    evaluator: Arc<E>,
}

impl<E> RoutineTaskFilter<E>
where
    E: ExpressionEvaluator,
{
    /// Creates a filter backed by `evaluator`.
    #[must_use]
    pub const fn new(evaluator: Arc<E>) -> Self {
        Self { evaluator }
    }

    /// Returns the tasks matching the routine's filter expression, in input
    /// order.
    ///
    /// The expression is compiled once. A task whose evaluation fails is
    /// left out.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError`] when the expression does not compile.
    pub fn apply<'a>(
        &self,
        routine: &Routine,
        tasks: &'a [Task],
        catalogue: &[Tag],
    ) -> Result<Vec<&'a Task>, ExpressionError> {
        let compiled = self.evaluator.compile(routine.task_filter_expression())?;

        Ok(tasks
            .iter()
            .filter(|task| {
                let context = TaskFilterContext::for_task(task, catalogue);
                compiled.evaluate(&context).unwrap_or_else(|err| {
                    warn!(
                        routine_id = %routine.id(),
                        task_id = %task.id(),
                        error = %err,
                        "task filter failed; excluding task"
                    );
                    false
                })
            })
            .collect())
    }
}
