//! Focus queue orchestration over the task repository.

use super::{FocusQueue, TaskLifecycleResult, TaskOrderingService};
use crate::task::{domain::TaskLocation, ports::TaskRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Builds focus queues from stored tasks.
#[derive(Clone)]
pub struct FocusService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> FocusService<R>
where
    R: TaskRepository,
{
    /// Creates a new focus service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the focus queue for `location` without touching skip state.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when lookup fails.
    pub async fn peek(&self, location: TaskLocation) -> TaskLifecycleResult<FocusQueue> {
        let tasks = self.repository.find_by_location(location).await?;
        Ok(TaskOrderingService::order(&tasks, location))
    }

    /// Rebuilds the focus queue for `location`.
    ///
    /// The queue is computed first, then every skip-for-now at the location
    /// is cleared and persisted so deprioritised tasks rejoin normal order
    /// on the next rebuild.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when lookup or
    /// persistence fails.
    pub async fn refresh(&self, location: TaskLocation) -> TaskLifecycleResult<FocusQueue> {
        let mut tasks = self.repository.find_by_location(location).await?;
        let queue = TaskOrderingService::order(&tasks, location);

        let cleared = TaskOrderingService::clear_transient_skips(&mut tasks);
        for task in tasks.iter().filter(|task| cleared.contains(&task.id())) {
            self.repository.save(task).await?;
        }

        debug!(%location, cleared = cleared.len(), "cleared transient skips");
        info!(
            %location,
            focus = ?queue.focus_task().map(|task| task.id()),
            up_next = queue.up_next().len(),
            hidden = queue.hidden_count(),
            "focus queue rebuilt"
        );
        Ok(queue)
    }
}
