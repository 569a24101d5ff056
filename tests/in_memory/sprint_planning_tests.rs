//! In-memory integration tests for sprint planning and capacity health.

use std::sync::Arc;

use crate::in_memory::helpers::{FixedIntervalRecurrence, clock, date};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use sprintwise::config::{HealthThresholds, PlannerConfig};
use sprintwise::sprint::{
    adapters::memory::InMemorySprintRepository,
    services::{HealthStatus, SprintPlanningService},
};
use sprintwise::tag::{adapters::memory::InMemoryTagRepository, domain::Tag, ports::TagRepository};
use sprintwise::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskLocation,
    services::{CreateTaskRequest, TaskLifecycleService},
};

type Planning =
    SprintPlanningService<InMemorySprintRepository, InMemoryTaskRepository, InMemoryTagRepository>;
type Lifecycle = TaskLifecycleService<InMemoryTaskRepository, FixedIntervalRecurrence, DefaultClock>;

struct Planner {
    planning: Planning,
    lifecycle: Lifecycle,
    tags: Arc<InMemoryTagRepository>,
}

fn planner_with(thresholds: HealthThresholds, clock: Arc<DefaultClock>) -> Planner {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let tags = Arc::new(InMemoryTagRepository::new());
    Planner {
        planning: SprintPlanningService::new(
            Arc::new(InMemorySprintRepository::new()),
            Arc::clone(&tasks),
            Arc::clone(&tags),
            thresholds,
        ),
        lifecycle: TaskLifecycleService::new(tasks, Arc::new(FixedIntervalRecurrence), clock),
        tags,
    }
}

#[fixture]
fn planner(clock: Arc<DefaultClock>) -> Planner {
    planner_with(HealthThresholds::default(), clock)
}

async fn schedule(planner: &Planner, location: TaskLocation, tag: &Tag, points: &[u32]) {
    for value in points {
        planner
            .lifecycle
            .create_task(CreateTaskRequest::new("scheduled work", [(tag.id(), *value)]).with_location(location))
            .await
            .expect("task creation should succeed");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_report_tracks_each_tag(planner: Planner) {
    let sprint = planner
        .planning
        .sprint_for_date(date(2025, 1, 8))
        .await
        .expect("sprint should be created");
    let work = Tag::create("work", 20).expect("valid tag");
    let fitness = Tag::create("fitness", 10).expect("valid tag");
    planner.tags.save(&work).await.expect("save work tag");
    planner.tags.save(&fitness).await.expect("save fitness tag");
    let location = TaskLocation::Sprint(sprint.id());
    schedule(&planner, location, &work, &[8, 8, 2]).await;
    schedule(&planner, location, &fitness, &[5]).await;
    schedule(&planner, TaskLocation::Backlog, &fitness, &[21]).await;

    let report = planner
        .planning
        .health_report(sprint.id())
        .await
        .expect("report should build");

    assert_eq!(sprint.start_date(), date(2025, 1, 5));
    assert_eq!(sprint.end_date(), date(2025, 1, 11));
    assert_eq!(
        report.tag(work.id()).map(|entry| entry.health()),
        Some(HealthStatus::AtRisk)
    );
    assert_eq!(
        report.tag(fitness.id()).map(|entry| entry.health()),
        Some(HealthStatus::OnTrack)
    );
    assert_eq!(report.overall(), HealthStatus::AtRisk);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overrides_and_moves_change_the_verdict(planner: Planner) {
    let sprint = planner
        .planning
        .create_sprint(date(2025, 1, 12))
        .await
        .expect("sprint should be created");
    let work = Tag::create("work", 20).expect("valid tag");
    planner.tags.save(&work).await.expect("save work tag");
    schedule(&planner, TaskLocation::Sprint(sprint.id()), &work, &[5, 3]).await;

    planner
        .planning
        .set_capacity_override(sprint.id(), work.id(), 5)
        .await
        .expect("override should be stored");
    let squeezed = planner
        .planning
        .health_report(sprint.id())
        .await
        .expect("report should build");
    assert_eq!(squeezed.overall(), HealthStatus::OffTrack);

    let backlog_task = planner
        .lifecycle
        .tasks_at(TaskLocation::Sprint(sprint.id()))
        .await
        .expect("listing")
        .into_iter()
        .find(|task| task.tag_points().total() == 3)
        .expect("three point task");
    planner
        .lifecycle
        .move_to_backlog(backlog_task.id())
        .await
        .expect("move should succeed");

    let relieved = planner
        .planning
        .health_report(sprint.id())
        .await
        .expect("report should build");
    assert_eq!(relieved.overall(), HealthStatus::AtRisk);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn thresholds_come_from_configuration(clock: Arc<DefaultClock>) {
    let config = PlannerConfig::from_toml_str(
        "[health]\nat_risk_percent = 50\noff_track_percent = 75\n",
    )
    .expect("config should parse");
    let planner = planner_with(config.health, clock);
    let sprint = planner
        .planning
        .create_sprint(date(2025, 1, 19))
        .await
        .expect("sprint should be created");
    let work = Tag::create("work", 20).expect("valid tag");
    planner.tags.save(&work).await.expect("save work tag");
    schedule(&planner, TaskLocation::Sprint(sprint.id()), &work, &[13]).await;

    let report = planner
        .planning
        .health_report(sprint.id())
        .await
        .expect("report should build");

    assert_eq!(report.overall(), HealthStatus::AtRisk);
}
