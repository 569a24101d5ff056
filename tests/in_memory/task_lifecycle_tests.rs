//! In-memory integration tests for task lifecycle and focus ordering.

use std::sync::Arc;

use crate::in_memory::helpers::{FixedIntervalRecurrence, clock};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use sprintwise::error::ErrorKind;
use sprintwise::sprint::domain::SprintId;
use sprintwise::tag::domain::TagId;
use sprintwise::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{FocusLevel, SessionStatus, TaskLocation, TaskStatus},
    services::{CreateTaskRequest, FocusService, TaskLifecycleError, TaskLifecycleService},
};

type Lifecycle = TaskLifecycleService<InMemoryTaskRepository, FixedIntervalRecurrence, DefaultClock>;

struct Services {
    lifecycle: Lifecycle,
    focus: FocusService<InMemoryTaskRepository>,
}

#[fixture]
fn services(clock: Arc<DefaultClock>) -> Services {
    let repository = Arc::new(InMemoryTaskRepository::new());
    Services {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::new(FixedIntervalRecurrence),
            clock,
        ),
        focus: FocusService::new(repository),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn focus_queue_follows_manual_order_and_skips(services: Services) {
    let sprint = SprintId::new();
    let tag = TagId::new();
    let mut ids = Vec::new();
    for (title, order) in [("Write docs", 3), ("Fix bug", 1), ("Review", 2), ("Plan", 4)] {
        let task = services
            .lifecycle
            .create_task(
                CreateTaskRequest::new(title, [(tag, 2)])
                    .with_location(TaskLocation::Sprint(sprint))
                    .with_order(order),
            )
            .await
            .expect("task creation should succeed");
        ids.push(task.id());
    }
    let [docs, bug, review, plan] = ids.as_slice() else {
        panic!("expected four tasks");
    };

    services
        .lifecycle
        .skip_for_now(*bug)
        .await
        .expect("skip for now should succeed");
    services
        .lifecycle
        .skip_for_day(*plan, "waiting on input")
        .await
        .expect("skip for day should succeed");

    let queue = services
        .focus
        .refresh(TaskLocation::Sprint(sprint))
        .await
        .expect("refresh should succeed");
    assert_eq!(queue.focus_task().map(|task| task.id()), Some(*review));
    assert_eq!(queue.visible_ids(), vec![*review, *docs, *bug]);
    assert_eq!(queue.hidden_count(), 1);

    let next = services
        .focus
        .peek(TaskLocation::Sprint(sprint))
        .await
        .expect("peek should succeed");
    assert_eq!(next.visible_ids(), vec![*bug, *review, *docs]);
    assert_eq!(next.hidden_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_leaves_the_queue(services: Services) {
    let tag = TagId::new();
    let task = services
        .lifecycle
        .create_task(CreateTaskRequest::new("Only task", [(tag, 1)]))
        .await
        .expect("task creation should succeed");

    let (running, session_id) = services
        .lifecycle
        .start_session(task.id(), 25)
        .await
        .expect("session should start");
    assert!(running.active_session().is_some());
    let ended = services
        .lifecycle
        .end_session(task.id(), session_id, FocusLevel::Focused)
        .await
        .expect("session should end");
    assert_eq!(
        ended.session(session_id).map(|session| session.status()),
        Some(SessionStatus::Completed)
    );

    let done = services
        .lifecycle
        .complete(task.id())
        .await
        .expect("complete should succeed");
    assert_eq!(done.status(), TaskStatus::Completed);

    let queue = services
        .focus
        .peek(TaskLocation::Backlog)
        .await
        .expect("peek should succeed");
    assert!(queue.focus_task().is_none());

    let again = services.lifecycle.cancel(task.id(), "too late").await;
    let Err(err) = again else {
        panic!("terminal task must not transition");
    };
    assert_eq!(err.kind(), Some(ErrorKind::InvalidTransition));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn templates_spawn_instances_into_the_backlog(services: Services) {
    let tag = TagId::new();
    let template = services
        .lifecycle
        .create_task(CreateTaskRequest::new("Water plants", [(tag, 1)]).with_recurrence("WEEKLY"))
        .await
        .expect("template creation should succeed");

    let instance = services
        .lifecycle
        .spawn_instance(template.id())
        .await
        .expect("spawn should succeed");
    assert_eq!(instance.parent_id(), Some(template.id()));
    assert!(!instance.is_template());

    let templates = services.lifecycle.templates().await.expect("templates");
    assert_eq!(templates, vec![template.clone()]);

    let description = services
        .lifecycle
        .describe_recurrence(template.id())
        .await
        .expect("description");
    assert_eq!(description, "repeats weekly");

    let queue = services
        .focus
        .peek(TaskLocation::Backlog)
        .await
        .expect("peek should succeed");
    assert_eq!(queue.visible_ids(), vec![instance.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_recurrence_rules_are_rejected(services: Services) {
    let result = services
        .lifecycle
        .create_task(CreateTaskRequest::new("Odd", [(TagId::new(), 1)]).with_recurrence("HOURLY"))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::InvalidRecurrence { ref rule, .. }) if rule == "HOURLY"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_between_backlog_and_sprint(services: Services) {
    let sprint = SprintId::new();
    let task = services
        .lifecycle
        .create_task(CreateTaskRequest::new("Refactor", [(TagId::new(), 5)]))
        .await
        .expect("task creation should succeed");

    let moved = services
        .lifecycle
        .move_to_sprint(task.id(), sprint)
        .await
        .expect("move should succeed");
    assert_eq!(moved.location(), TaskLocation::Sprint(sprint));
    assert_eq!(moved.sprint_history(), [sprint]);

    let back = services
        .lifecycle
        .move_to_backlog(task.id())
        .await
        .expect("move back should succeed");
    assert_eq!(back.location(), TaskLocation::Backlog);
    assert_eq!(
        services
            .lifecycle
            .tasks_at(TaskLocation::Backlog)
            .await
            .expect("listing")
            .len(),
        1
    );
}
