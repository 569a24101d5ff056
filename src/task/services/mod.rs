//! Application services for task lifecycle orchestration.

mod focus;
mod lifecycle;
mod ordering;

pub use focus::FocusService;
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
pub use ordering::{FocusBucket, FocusQueue, TaskOrderingService};
