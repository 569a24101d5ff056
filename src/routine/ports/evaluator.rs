//! Expression evaluator port.
//!
//! Routine filters and activation rules are boolean expressions over an
//! [`EvaluationContext`]. The expression language lives behind this port;
//! implementations must support `hasTag(name)`, `hasAnyTag([...])` and
//! `hasAllTags([...])` over the context's `tags` list, which
//! [`EvaluationContext`] exposes directly.

use crate::routine::domain::EvaluationContext;
use thiserror::Error;

/// Outcome of validating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionValidation {
    /// The expression is well formed.
    Valid,
    /// The expression is malformed.
    Invalid {
        /// Evaluator-provided reason.
        reason: String,
    },
}

impl ExpressionValidation {
    /// Returns whether the expression is well formed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Errors raised by expression evaluators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpressionError {
    /// The expression could not be parsed.
    #[error("invalid expression '{expression}': {reason}")]
    Invalid {
        /// Offending expression.
        expression: String,
        /// Evaluator-provided reason.
        reason: String,
    },

    /// The expression parsed but failed against a context.
    #[error("failed to evaluate '{expression}': {reason}")]
    Evaluation {
        /// Offending expression.
        expression: String,
        /// Evaluator-provided reason.
        reason: String,
    },
}

/// An expression compiled once and evaluated against many contexts.
#[cfg_attr(test, mockall::automock)]
pub trait CompiledExpression: Send + Sync {
    /// Evaluates the expression.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Evaluation`] when the context lacks a
    /// referenced key or a value has the wrong type.
    fn evaluate(&self, context: &EvaluationContext) -> Result<bool, ExpressionError>;
}

/// Expression engine contract.
#[cfg_attr(test, mockall::automock)]
pub trait ExpressionEvaluator: Send + Sync {
    /// Checks whether `expression` is well formed.
    fn validate(&self, expression: &str) -> ExpressionValidation;

    /// Compiles `expression` for repeated evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Invalid`] when `expression` is malformed.
    fn compile(&self, expression: &str) -> Result<Box<dyn CompiledExpression>, ExpressionError>;

    /// Evaluates `expression` once.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError`] when parsing or evaluation fails.
    fn evaluate(
        &self,
        expression: &str,
        context: &EvaluationContext,
    ) -> Result<bool, ExpressionError>;
}
