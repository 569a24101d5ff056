//! Selection of the routine that is live at a point in time.

use crate::routine::{
    domain::{EvaluationContext, Routine, RoutineDomainError, RoutineId},
    ports::ExpressionEvaluator,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Picks the active routine by evaluating activation expressions.
#[derive(Clone)]
pub struct ActiveRoutineDeterminer<E>
where
    E: ExpressionEvaluator,
{
    evaluator: Arc<E>,
}

impl<E> ActiveRoutineDeterminer<E>
where
    E: ExpressionEvaluator,
{
    /// Creates a determiner backed by `evaluator`.
    #[must_use]
    pub const fn new(evaluator: Arc<E>) -> Self {
        Self { evaluator }
    }

    /// Returns the routine that should be active.
    ///
    /// With `override_id` set, that routine is returned without evaluating
    /// anything. Otherwise every activation expression is evaluated against
    /// `context` and the highest-priority live routine wins. Ties go to the
    /// routine that appears first in `routines`. An expression that fails to
    /// evaluate counts as inactive.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::RoutineNotFound`] when `override_id`
    /// names no routine in `routines`.
    pub fn determine<'a>(
        &self,
        routines: &'a [Routine],
        context: &EvaluationContext,
        override_id: Option<RoutineId>,
    ) -> Result<Option<&'a Routine>, RoutineDomainError> {
        if let Some(id) = override_id {
            let routine = routines
                .iter()
                .find(|routine| routine.id() == id)
                .ok_or(RoutineDomainError::RoutineNotFound(id))?;
            debug!(routine_id = %id, "routine selected by override");
            return Ok(Some(routine));
        }

        let mut selected: Option<&'a Routine> = None;
        for routine in routines.iter().filter(|routine| self.is_live(routine, context)) {
            if selected.is_none_or(|best| routine.priority() > best.priority()) {
                selected = Some(routine);
            }
        }

        debug!(
            routine_id = ?selected.map(Routine::id),
            candidates = routines.len(),
            "active routine determined"
        );
        Ok(selected)
    }

    fn is_live(&self, routine: &Routine, context: &EvaluationContext) -> bool {
        match self
            .evaluator
            .evaluate(routine.activation_expression(), context)
        {
            Ok(live) => live,
            Err(err) => {
                warn!(
                    routine_id = %routine.id(),
                    error = %err,
                    "activation expression failed; treating routine as inactive"
                );
                false
            }
        }
    }
}
