//! In-memory integration tests for routine selection and filtering.

use std::sync::Arc;

use crate::in_memory::helpers::{FixedIntervalRecurrence, PredicateEvaluator, clock, date, local_time};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use sprintwise::error::ErrorKind;
use sprintwise::routine::{
    adapters::memory::InMemoryRoutineRepository,
    domain::RoutineDraft,
    services::{RoutineService, RoutineServiceError},
};
use sprintwise::tag::{adapters::memory::InMemoryTagRepository, domain::Tag, ports::TagRepository};
use sprintwise::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskLocation,
    services::{CreateTaskRequest, TaskLifecycleService},
};

type Routines = RoutineService<
    InMemoryRoutineRepository,
    PredicateEvaluator,
    InMemoryTaskRepository,
    InMemoryTagRepository,
    DefaultClock,
>;
type Lifecycle = TaskLifecycleService<InMemoryTaskRepository, FixedIntervalRecurrence, DefaultClock>;

struct World {
    routines: Routines,
    lifecycle: Lifecycle,
    tags: Arc<InMemoryTagRepository>,
}

#[fixture]
fn world(clock: Arc<DefaultClock>) -> World {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let tags = Arc::new(InMemoryTagRepository::new());
    World {
        routines: RoutineService::new(
            Arc::new(InMemoryRoutineRepository::new()),
            Arc::new(PredicateEvaluator),
            Arc::clone(&tasks),
            Arc::clone(&tags),
            Arc::clone(&clock),
        ),
        lifecycle: TaskLifecycleService::new(tasks, Arc::new(FixedIntervalRecurrence), clock),
        tags,
    }
}

async fn seed_routines(world: &World) {
    for draft in [
        RoutineDraft::new("Everyday", "true", "true"),
        RoutineDraft::new("Weekend", "hasTag('home')", "isWeekend").with_priority(5),
        RoutineDraft::new("Late", "hasTag('home')", "hour >= 21").with_priority(10),
    ] {
        world
            .routines
            .create_routine(draft)
            .await
            .expect("routine creation should succeed");
    }
}

#[rstest]
#[case(local_time(date(2025, 1, 8), 10), Some("Everyday"))]
#[case(local_time(date(2025, 1, 11), 10), Some("Weekend"))]
#[case(local_time(date(2025, 1, 11), 22), Some("Late"))]
#[case(local_time(date(2025, 1, 8), 21), Some("Late"))]
#[tokio::test(flavor = "multi_thread")]
async fn active_routine_depends_on_time(
    world: World,
    #[case] at: chrono::NaiveDateTime,
    #[case] expected: Option<&str>,
) {
    seed_routines(&world).await;

    let active = world
        .routines
        .active_routine(at, None)
        .await
        .expect("selection should succeed");

    assert_eq!(active.as_ref().map(|routine| routine.name()), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn override_wins_over_priority(world: World) {
    seed_routines(&world).await;
    let everyday = world
        .routines
        .find_by_name("everyday")
        .await
        .expect("lookup should succeed")
        .expect("routine exists");

    let active = world
        .routines
        .active_routine(local_time(date(2025, 1, 11), 23), Some(everyday.id()))
        .await
        .expect("selection should succeed");

    assert_eq!(active.map(|routine| routine.id()), Some(everyday.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_expressions_are_rejected_up_front(world: World) {
    let result = world
        .routines
        .create_routine(RoutineDraft::new("Broken", "hasTag(", "true"))
        .await;

    let Err(err) = result else {
        panic!("expected invalid expression");
    };
    assert_eq!(err.kind(), Some(ErrorKind::Validation));
    assert!(matches!(err, RoutineServiceError::InvalidExpression { .. }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn routine_tasks_are_selected_by_tag(world: World) {
    let home = Tag::create("Home", 10).expect("valid tag");
    let work = Tag::create("Work", 20).expect("valid tag");
    world.tags.save(&home).await.expect("save home tag");
    world.tags.save(&work).await.expect("save work tag");
    for (title, tag) in [("Fix sink", &home), ("Ship release", &work), ("Tidy garage", &home)] {
        world
            .lifecycle
            .create_task(CreateTaskRequest::new(title, [(tag.id(), 3)]))
            .await
            .expect("task creation should succeed");
    }
    let weekend = world
        .routines
        .create_routine(RoutineDraft::new("Weekend", "hasTag('home')", "isWeekend"))
        .await
        .expect("routine creation should succeed");

    let tasks = world
        .routines
        .tasks_for_routine(weekend.id(), TaskLocation::Backlog)
        .await
        .expect("filtering should succeed");

    let titles: Vec<&str> = tasks.iter().map(|task| task.title()).collect();
    assert_eq!(titles, ["Fix sink", "Tidy garage"]);
}
