//! Active routine selection.

use std::sync::Arc;

use super::scripted_evaluator;
use crate::error::ErrorKind;
use crate::routine::{
    domain::{ActivationContext, EvaluationContext, Routine, RoutineDraft, RoutineId},
    ports::evaluator::MockExpressionEvaluator,
    services::ActiveRoutineDeterminer,
};
use crate::test_support::date;
use chrono::NaiveTime;
use rstest::{fixture, rstest};

fn routine(name: &str, activation: &str, priority: i32) -> Routine {
    Routine::create(RoutineDraft::new(name, "always", activation).with_priority(priority))
        .expect("valid routine")
}

#[fixture]
fn determiner() -> ActiveRoutineDeterminer<MockExpressionEvaluator> {
    ActiveRoutineDeterminer::new(Arc::new(scripted_evaluator()))
}

#[fixture]
fn saturday_morning() -> EvaluationContext {
    ActivationContext::at(date(2025, 1, 11).and_time(NaiveTime::from_hms_opt(8, 0, 0).expect("valid time")))
}

#[rstest]
fn highest_priority_live_routine_wins(
    determiner: ActiveRoutineDeterminer<MockExpressionEvaluator>,
    saturday_morning: EvaluationContext,
) {
    let routines = vec![
        routine("Default", "always", 0),
        routine("Weekend", "weekend", 10),
        routine("Night", "hour>=22", 50),
    ];

    let active = determiner
        .determine(&routines, &saturday_morning, None)
        .expect("selection succeeds");

    assert_eq!(active.map(Routine::name), Some("Weekend"));
}

#[rstest]
fn ties_keep_repository_order(
    determiner: ActiveRoutineDeterminer<MockExpressionEvaluator>,
    saturday_morning: EvaluationContext,
) {
    let routines = vec![
        routine("Low", "always", 1),
        routine("First", "always", 7),
        routine("Second", "always", 7),
    ];

    let active = determiner
        .determine(&routines, &saturday_morning, None)
        .expect("selection succeeds");

    assert_eq!(active.map(Routine::name), Some("First"));
}

#[rstest]
fn nothing_live_yields_none(
    determiner: ActiveRoutineDeterminer<MockExpressionEvaluator>,
    saturday_morning: EvaluationContext,
) {
    let routines = vec![routine("Never", "never", 3), routine("Night", "hour>=22", 1)];

    let active = determiner
        .determine(&routines, &saturday_morning, None)
        .expect("selection succeeds");

    assert!(active.is_none());
    assert!(
        determiner
            .determine(&[], &saturday_morning, None)
            .expect("selection succeeds")
            .is_none()
    );
}

#[rstest]
fn failing_activation_counts_as_inactive(
    determiner: ActiveRoutineDeterminer<MockExpressionEvaluator>,
    saturday_morning: EvaluationContext,
) {
    let routines = vec![routine("Broken", "broken", 100), routine("Fallback", "always", 0)];

    let active = determiner
        .determine(&routines, &saturday_morning, None)
        .expect("selection succeeds");

    assert_eq!(active.map(Routine::name), Some("Fallback"));
}

#[rstest]
fn override_bypasses_evaluation(saturday_morning: EvaluationContext) {
    let mut evaluator = MockExpressionEvaluator::new();
    evaluator.expect_evaluate().never();
    let determiner = ActiveRoutineDeterminer::new(Arc::new(evaluator));
    let chosen_routine = routine("Chosen", "never", 0);
    let chosen = chosen_routine.id();
    let routines = vec![routine("Busy", "always", 10), chosen_routine];

    let active = determiner
        .determine(&routines, &saturday_morning, Some(chosen))
        .expect("override resolves");

    assert_eq!(active.map(Routine::id), Some(chosen));
}

#[rstest]
fn unknown_override_is_not_found(
    determiner: ActiveRoutineDeterminer<MockExpressionEvaluator>,
    saturday_morning: EvaluationContext,
) {
    let routines = vec![routine("Only", "always", 0)];

    let Err(err) = determiner.determine(&routines, &saturday_morning, Some(RoutineId::new())) else {
        panic!("expected missing routine");
    };

    assert_eq!(err.kind(), ErrorKind::NotFound);
}
