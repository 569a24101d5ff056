//! Serialization of the task aggregate and its nested entities.

use crate::sprint::domain::SprintId;
use crate::tag::domain::TagId;
use crate::task::domain::{
    FocusLevel, ManualSession, TagPoints, Task, TaskDraft, TaskLocation, TaskStatus,
};
use crate::test_support::{FixedClock, utc};
use eyre::Result;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
fn fully_populated_task_round_trips() -> Result<()> {
    let clock = FixedClock::at(utc(2025, 1, 6, 9, 0));
    let sprint = SprintId::new();
    let mut task = Task::create(
        TaskDraft::new("Prepare talk", TagPoints::new([(TagId::new(), 5), (TagId::new(), 2)])?)
            .with_description("slides and demo")
            .with_order(3),
        &clock,
    )?;
    task.move_to_sprint(sprint)?;
    task.add_comment("outline agreed", &clock)?;
    let session = task.start_session(25, &clock)?;
    clock.advance(chrono::Duration::minutes(25));
    task.end_session(session, FocusLevel::Focused, &clock)?;
    task.add_manual_session(
        ManualSession::new(utc(2025, 1, 5, 8, 0), utc(2025, 1, 5, 9, 0), FocusLevel::Neutral)
            .with_note("rehearsal"),
    )?;
    task.skip_for_day("travel", &clock)?;

    let encoded = serde_json::to_string(&task)?;
    let decoded: Task = serde_json::from_str(&encoded)?;

    assert_eq!(decoded, task);
    Ok(())
}

#[rstest]
fn location_and_status_use_snake_case_tags() -> Result<()> {
    let sprint = SprintId::new();
    let location = serde_json::to_value(TaskLocation::Sprint(sprint))?;
    let backlog = serde_json::to_value(TaskLocation::Backlog)?;
    let status = serde_json::to_value(TaskStatus::Canceled)?;

    assert_eq!(location, json!({ "type": "sprint", "sprint_id": sprint.to_string() }));
    assert_eq!(backlog, json!({ "type": "backlog" }));
    assert_eq!(status, Value::String("canceled".to_owned()));
    Ok(())
}

#[rstest]
fn invalid_points_are_rejected_on_decode() -> Result<()> {
    let clock = FixedClock::at(utc(2025, 1, 6, 9, 0));
    let tag = TagId::new();
    let task = Task::create(
        TaskDraft::new("Estimate", TagPoints::new([(tag, 3)])?),
        &clock,
    )?;
    let mut value = serde_json::to_value(&task)?;
    value["tag_points"][tag.to_string()] = json!(4);

    let result: Result<Task, _> = serde_json::from_value(value);

    assert!(result.is_err());
    Ok(())
}
