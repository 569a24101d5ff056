//! In-memory integration tests.
//!
//! Tests are organized into modules by workflow:
//! - `task_lifecycle_tests`: Task creation, transitions and focus queues
//! - `sprint_planning_tests`: Weekly sprints and capacity health
//! - `routine_tests`: Routine creation, activation and task filtering

mod in_memory {
    pub mod helpers;

    mod routine_tests;
    mod sprint_planning_tests;
    mod task_lifecycle_tests;
}
