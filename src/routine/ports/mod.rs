//! Port contracts for routine evaluation and persistence.

pub mod evaluator;
pub mod repository;

pub use evaluator::{CompiledExpression, ExpressionError, ExpressionEvaluator, ExpressionValidation};
pub use repository::{RoutineRepository, RoutineRepositoryError, RoutineRepositoryResult};
