//! Routine service orchestration against in-memory repositories.

use std::sync::Arc;

use super::scripted_evaluator;
use crate::error::ErrorKind;
use crate::routine::{
    adapters::memory::InMemoryRoutineRepository,
    domain::{RoutineDraft, RoutineId},
    ports::{RoutineRepositoryError, evaluator::MockExpressionEvaluator},
    services::{RoutineService, RoutineServiceError},
};
use crate::sprint::domain::SprintId;
use crate::tag::{adapters::memory::InMemoryTagRepository, domain::Tag, ports::TagRepository};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TagPoints, Task, TaskDraft, TaskLocation},
    ports::TaskRepository,
};
use crate::test_support::{FixedClock, date, utc};
use chrono::NaiveTime;
use eyre::Result;
use rstest::{fixture, rstest};

type TestService = RoutineService<
    InMemoryRoutineRepository,
    MockExpressionEvaluator,
    InMemoryTaskRepository,
    InMemoryTagRepository,
    FixedClock,
>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
    tags: Arc<InMemoryTagRepository>,
    clock: Arc<FixedClock>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let tags = Arc::new(InMemoryTagRepository::new());
    let clock = Arc::new(FixedClock::at(utc(2025, 1, 6, 9, 0)));
    let service = RoutineService::new(
        Arc::new(InMemoryRoutineRepository::new()),
        Arc::new(scripted_evaluator()),
        Arc::clone(&tasks),
        Arc::clone(&tags),
        Arc::clone(&clock),
    );
    Harness {
        service,
        tasks,
        tags,
        clock,
    }
}

fn at(hour: u32) -> chrono::NaiveDateTime {
    date(2025, 1, 11).and_time(NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_routine_persists(harness: Harness) -> Result<()> {
    let created = harness
        .service
        .create_routine(RoutineDraft::new("Morning", "tag:work", "hour>=6").with_priority(3))
        .await?;

    assert_eq!(harness.service.find_by_id(created.id()).await?, Some(created.clone()));
    assert_eq!(
        harness.service.find_by_name("MORNING").await?,
        Some(created.clone())
    );
    assert_eq!(harness.service.list().await?, vec![created]);
    Ok(())
}

#[rstest]
#[case(RoutineDraft::new("Bad filter", "invalid ((", "always"), "task filter")]
#[case(RoutineDraft::new("Bad activation", "always", "invalid ))"), "activation")]
#[tokio::test(flavor = "multi_thread")]
async fn create_routine_rejects_invalid_expressions(
    harness: Harness,
    #[case] draft: RoutineDraft,
    #[case] rejected: &str,
) -> Result<()> {
    let result = harness.service.create_routine(draft).await;

    let Err(err) = result else {
        return Err(eyre::eyre!("expected invalid expression"));
    };
    assert_eq!(err.kind(), Some(ErrorKind::Validation));
    assert!(matches!(
        err,
        RoutineServiceError::InvalidExpression { field, .. } if field == rejected
    ));
    assert!(harness.service.list().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn routine_names_are_unique(harness: Harness) -> Result<()> {
    harness
        .service
        .create_routine(RoutineDraft::new("Focus", "always", "always"))
        .await?;

    let result = harness
        .service
        .create_routine(RoutineDraft::new("focus", "never", "never"))
        .await;

    assert!(matches!(
        result,
        Err(RoutineServiceError::Repository(RoutineRepositoryError::DuplicateName(_)))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_routine_follows_priority_and_time(harness: Harness) -> Result<()> {
    harness
        .service
        .create_routine(RoutineDraft::new("Default", "always", "always"))
        .await?;
    let evening = harness
        .service
        .create_routine(RoutineDraft::new("Evening", "always", "hour>=18").with_priority(5))
        .await?;

    let morning_pick = harness.service.active_routine(at(8), None).await?;
    let evening_pick = harness.service.active_routine(at(19), None).await?;

    assert_eq!(morning_pick.map(|routine| routine.name().to_owned()), Some("Default".to_owned()));
    assert_eq!(evening_pick.map(|routine| routine.id()), Some(evening.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_routine_now_honours_override(harness: Harness) -> Result<()> {
    harness
        .service
        .create_routine(RoutineDraft::new("Busy", "always", "always").with_priority(9))
        .await?;
    let quiet = harness
        .service
        .create_routine(RoutineDraft::new("Quiet", "always", "never"))
        .await?;

    let chosen = harness.service.active_routine_now(Some(quiet.id())).await?;
    let automatic = harness.service.active_routine_now(None).await?;

    assert_eq!(chosen, Some(quiet));
    assert_eq!(automatic.map(|routine| routine.priority()), Some(9));

    let missing = harness.service.active_routine_now(Some(RoutineId::new())).await;
    let Err(err) = missing else {
        return Err(eyre::eyre!("expected missing routine"));
    };
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_for_routine_filters_location_tasks(harness: Harness) -> Result<()> {
    let work = Tag::create("work", 20)?;
    let home = Tag::create("home", 10)?;
    harness.tags.save(&work).await?;
    harness.tags.save(&home).await?;
    let sprint = SprintId::new();
    for (title, tag, location) in [
        ("Deploy", work.id(), TaskLocation::Sprint(sprint)),
        ("Laundry", home.id(), TaskLocation::Sprint(sprint)),
        ("Plan roadmap", work.id(), TaskLocation::Backlog),
    ] {
        let task = Task::create(
            TaskDraft::new(title, TagPoints::new([(tag, 2)])?).with_location(location),
            harness.clock.as_ref(),
        )?;
        harness.tasks.save(&task).await?;
    }
    let template = Task::create(
        TaskDraft::new("Weekly sync", TagPoints::new([(work.id(), 1)])?)
            .with_recurrence("FREQ=WEEKLY"),
        harness.clock.as_ref(),
    )?;
    harness.tasks.save(&template).await?;
    let office = harness
        .service
        .create_routine(RoutineDraft::new("Office", "tag:work", "always"))
        .await?;

    let in_sprint = harness
        .service
        .tasks_for_routine(office.id(), TaskLocation::Sprint(sprint))
        .await?;
    let in_backlog = harness
        .service
        .tasks_for_routine(office.id(), TaskLocation::Backlog)
        .await?;

    let sprint_titles: Vec<&str> = in_sprint.iter().map(|task| task.title()).collect();
    let backlog_titles: Vec<&str> = in_backlog.iter().map(|task| task.title()).collect();
    assert_eq!(sprint_titles, ["Deploy"]);
    assert_eq!(backlog_titles, ["Plan roadmap"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_are_validated_and_persisted(harness: Harness) -> Result<()> {
    let routine = harness
        .service
        .create_routine(RoutineDraft::new("Reading", "always", "always"))
        .await?;

    let rejected = harness
        .service
        .update_activation(routine.id(), "invalid ((")
        .await;
    assert!(matches!(
        rejected,
        Err(RoutineServiceError::InvalidExpression { field: "activation", .. })
    ));

    harness.service.update_task_filter(routine.id(), "tag:books").await?;
    harness.service.set_priority(routine.id(), 4).await?;
    let renamed = harness.service.rename(routine.id(), "Evening reading").await?;

    assert_eq!(renamed.task_filter_expression(), "tag:books");
    assert_eq!(renamed.activation_expression(), "always");
    assert_eq!(renamed.priority(), 4);
    assert_eq!(
        harness.service.find_by_id(routine.id()).await?,
        Some(renamed)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_routine(harness: Harness) -> Result<()> {
    let routine = harness
        .service
        .create_routine(RoutineDraft::new("Temp", "always", "always"))
        .await?;

    harness.service.delete(routine.id()).await?;

    assert!(harness.service.find_by_id(routine.id()).await?.is_none());
    let again = harness.service.delete(routine.id()).await;
    assert!(matches!(
        again,
        Err(RoutineServiceError::Repository(RoutineRepositoryError::NotFound(_)))
    ));
    Ok(())
}
