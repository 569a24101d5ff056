//! Unit tests for the routine bounded context.

mod determiner_tests;
mod service_tests;

use crate::routine::{
    domain::EvaluationContext,
    ports::{
        CompiledExpression, ExpressionError, ExpressionValidation,
        evaluator::{MockCompiledExpression, MockExpressionEvaluator},
    },
};

/// Interprets the tiny vocabulary used by these tests.
///
/// `always`, `never`, `weekend`, `hour>=N`, `tag:NAME` and `broken` (which
/// fails at evaluation time).
fn interpret(expression: &str, context: &EvaluationContext) -> Result<bool, ExpressionError> {
    let failure = |reason: &str| ExpressionError::Evaluation {
        expression: expression.to_owned(),
        reason: reason.to_owned(),
    };
    match expression {
        "always" => Ok(true),
        "never" => Ok(false),
        "weekend" => context.bool("isWeekend").ok_or_else(|| failure("isWeekend missing")),
        "broken" => Err(failure("boom")),
        other => {
            if let Some(name) = other.strip_prefix("tag:") {
                return Ok(context.has_tag(name));
            }
            if let Some(raw) = other.strip_prefix("hour>=") {
                let threshold: i64 = raw.parse().map_err(|_| failure("bad number"))?;
                let hour = context.integer("hour").ok_or_else(|| failure("hour missing"))?;
                return Ok(hour >= threshold);
            }
            Err(failure("unknown expression"))
        }
    }
}

/// Evaluator mock that accepts everything not prefixed with `invalid`.
pub(super) fn scripted_evaluator() -> MockExpressionEvaluator {
    let mut evaluator = MockExpressionEvaluator::new();
    evaluator.expect_validate().returning(|expression| {
        if expression.starts_with("invalid") {
            ExpressionValidation::Invalid {
                reason: "unexpected token".to_owned(),
            }
        } else {
            ExpressionValidation::Valid
        }
    });
    evaluator
        .expect_evaluate()
        .returning(|expression, context| interpret(expression, context));
    evaluator.expect_compile().returning(|expression| {
        if expression.starts_with("invalid") {
            return Err(ExpressionError::Invalid {
                expression: expression.to_owned(),
                reason: "unexpected token".to_owned(),
            });
        }
        let owned = expression.to_owned();
        let mut compiled = MockCompiledExpression::new();
        compiled
            .expect_evaluate()
            .returning(move |context| interpret(&owned, context));
        let boxed: Box<dyn CompiledExpression> = Box::new(compiled);
        Ok(boxed)
    });
    evaluator
}
