//! Domain model for routines and expression evaluation contexts.

mod context;
mod error;
mod ids;
mod routine;

pub use context::{ActivationContext, ContextValue, EvaluationContext, TAGS_KEY, TaskFilterContext};
pub use error::RoutineDomainError;
pub use ids::RoutineId;
pub use routine::{Routine, RoutineDraft};
pub(crate) use routine::{ACTIVATION_FIELD, TASK_FILTER_FIELD};
