//! Focus ordering: which task to work on next.
//!
//! Pure functions over already-loaded tasks. Tasks are partitioned into
//! three buckets:
//!
//! 1. visible: no skip state, or a day skip that has been returned
//! 2. deprioritised: skipped for now
//! 3. hidden: skipped for the day and not yet returned
//!
//! The first two buckets, each ordered by `(order, created_at)`, form the
//! queue. Its head is the focus task; the rest is "up next". Hidden tasks
//! are only counted.

use crate::task::domain::{SkipState, Task, TaskId, TaskLocation};

/// Placement of a task within the focus queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FocusBucket {
    /// Shown in normal order.
    Visible,
    /// Shown after every visible task.
    Deprioritised,
    /// Not shown; only counted.
    Hidden,
}

impl FocusBucket {
    /// Classifies a task by its skip state.
    #[must_use]
    pub const fn of(task: &Task) -> Self {
        match task.skip_state() {
            None | Some(SkipState::ForDay { returned: true, .. }) => Self::Visible,
            Some(SkipState::ForNow) => Self::Deprioritised,
            Some(SkipState::ForDay { returned: false, .. }) => Self::Hidden,
        }
    }
}

/// Result of ordering the tasks at one location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusQueue {
    focus_task: Option<Task>,
    up_next: Vec<Task>,
    hidden_count: usize,
}

impl FocusQueue {
    /// Returns the recommended task, if any.
    #[must_use]
    pub const fn focus_task(&self) -> Option<&Task> {
        self.focus_task.as_ref()
    }

    /// Returns the queue after the focus task.
    #[must_use]
    pub fn up_next(&self) -> &[Task] {
        &self.up_next
    }

    /// Returns how many tasks are hidden for the day.
    #[must_use]
    pub const fn hidden_count(&self) -> usize {
        self.hidden_count
    }

    /// Returns the identifiers of the focus task and up-next queue in order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<TaskId> {
        self.focus_task
            .iter()
            .chain(self.up_next.iter())
            .map(Task::id)
            .collect()
    }
}

/// Stateless focus ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskOrderingService;

impl TaskOrderingService {
    /// Builds the focus queue for `location`.
    ///
    /// Tasks that are not active, not at `location`, or recurring templates
    /// are ignored.
    #[must_use]
    pub fn order<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
        location: TaskLocation,
    ) -> FocusQueue {
        let mut visible = Vec::new();
        let mut deprioritised = Vec::new();
        let mut hidden_count = 0_usize;

        let candidates = tasks.into_iter().filter(|task| {
            task.is_active() && !task.is_template() && task.location() == location
        });
        for task in candidates {
            match FocusBucket::of(task) {
                FocusBucket::Visible => visible.push(task),
                FocusBucket::Deprioritised => deprioritised.push(task),
                FocusBucket::Hidden => hidden_count += 1,
            }
        }

        sort_stable(&mut visible);
        sort_stable(&mut deprioritised);

        let mut queue = visible.into_iter().chain(deprioritised).cloned();
        let focus_task = queue.next();
        FocusQueue {
            focus_task,
            up_next: queue.collect(),
            hidden_count,
        }
    }

    /// Clears every skip-for-now in `tasks`, returning the touched ids.
    pub fn clear_transient_skips<'a>(tasks: impl IntoIterator<Item = &'a mut Task>) -> Vec<TaskId> {
        tasks
            .into_iter()
            .filter_map(|task| task.clear_transient_skip().then_some(task.id()))
            .collect()
    }
}

fn sort_stable(tasks: &mut [&Task]) {
    tasks.sort_by_key(|task| (task.order(), task.created_at()));
}
