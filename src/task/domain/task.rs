//! Task aggregate root.

use super::{
    Comment, CommentId, CommentKind, FocusLevel, ManualSession, Session, SessionId,
    SessionStatus, SkipState, TagPoints, TaskDomainError, TaskId, TaskLocation, TaskStatus,
};
use crate::sprint::domain::SprintId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// A task carrying a recurrence rule is a *template*: it stays in the
/// backlog, never runs a session, and only spawns instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    tag_points: TagPoints,
    location: TaskLocation,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    canceled_at: Option<DateTime<Utc>>,
    skip_state: Option<SkipState>,
    recurrence: Option<String>,
    parent_id: Option<TaskId>,
    comments: Vec<Comment>,
    sessions: Vec<Session>,
    sprint_history: Vec<SprintId>,
    order: i64,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    tag_points: TagPoints,
    description: Option<String>,
    location: TaskLocation,
    recurrence: Option<String>,
    order: i64,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, tag_points: TagPoints) -> Self {
        Self {
            title: title.into(),
            tag_points,
            description: None,
            location: TaskLocation::Backlog,
            recurrence: None,
            order: 0,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial location.
    #[must_use]
    pub const fn with_location(mut self, location: TaskLocation) -> Self {
        self.location = location;
        self
    }

    /// Sets a recurrence rule, turning the task into a template.
    #[must_use]
    pub fn with_recurrence(mut self, rule: impl Into<String>) -> Self {
        self.recurrence = Some(rule.into());
        self
    }

    /// Sets the manual ordering key.
    #[must_use]
    pub const fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Returns the recurrence rule, if any.
    #[must_use]
    pub fn recurrence(&self) -> Option<&str> {
        self.recurrence.as_deref()
    }
}

impl Task {
    /// Creates a new active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyRecurrence`] for blank input, and
    /// [`TaskDomainError::TemplateNotSchedulable`] when a recurring template
    /// is created directly into a sprint.
    pub fn create(draft: TaskDraft, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let TaskDraft {
            title,
            tag_points,
            description,
            location,
            recurrence,
            order,
        } = draft;

        let id = TaskId::new();
        let normalized_title = normalize_title(&title)?;
        let normalized_recurrence = recurrence.map(|rule| normalize_rule(&rule)).transpose()?;
        if normalized_recurrence.is_some() && !location.is_backlog() {
            return Err(TaskDomainError::TemplateNotSchedulable(id));
        }

        let mut task = Self {
            id,
            title: normalized_title,
            description: description.as_deref().and_then(normalize_optional),
            status: TaskStatus::Active,
            tag_points,
            location,
            created_at: clock.utc(),
            completed_at: None,
            canceled_at: None,
            skip_state: None,
            recurrence: normalized_recurrence,
            parent_id: None,
            comments: Vec::new(),
            sessions: Vec::new(),
            sprint_history: Vec::new(),
            order,
        };
        task.record_sprint_entry();
        Ok(task)
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the point allocation.
    #[must_use]
    pub const fn tag_points(&self) -> &TagPoints {
        &self.tag_points
    }

    /// Returns the current location.
    #[must_use]
    pub const fn location(&self) -> TaskLocation {
        self.location
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the cancellation timestamp, if canceled.
    #[must_use]
    pub const fn canceled_at(&self) -> Option<DateTime<Utc>> {
        self.canceled_at
    }

    /// Returns the skip state, if skipped.
    #[must_use]
    pub const fn skip_state(&self) -> Option<&SkipState> {
        self.skip_state.as_ref()
    }

    /// Returns the recurrence rule for templates.
    #[must_use]
    pub fn recurrence(&self) -> Option<&str> {
        self.recurrence.as_deref()
    }

    /// Returns the template this task was spawned from.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns the comments, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the sessions, oldest first.
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Returns the sprints this task has passed through, oldest first.
    #[must_use]
    pub fn sprint_history(&self) -> &[SprintId] {
        &self.sprint_history
    }

    /// Returns the manual ordering key.
    #[must_use]
    pub const fn order(&self) -> i64 {
        self.order
    }

    /// Returns whether the task is a recurring template.
    #[must_use]
    pub const fn is_template(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Returns whether the task is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, TaskStatus::Active)
    }

    /// Returns whether the focus queue can surface this task.
    ///
    /// Active, non-template tasks are visible unless skipped for the day
    /// and not yet returned.
    #[must_use]
    pub fn is_visible_in_focus(&self) -> bool {
        self.is_active()
            && !self.is_template()
            && !self.skip_state.as_ref().is_some_and(SkipState::is_hidden)
    }

    /// Returns the running session, if any.
    #[must_use]
    pub fn active_session(&self) -> Option<&Session> {
        self.sessions.iter().find(|session| session.is_in_progress())
    }

    /// Looks up a session by identifier.
    #[must_use]
    pub fn session(&self, session_id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id() == session_id)
    }

    /// Looks up a comment by identifier.
    #[must_use]
    pub fn comment(&self, comment_id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id() == comment_id)
    }

    /// Returns the seconds spent in completed sessions.
    #[must_use]
    pub fn total_focus_seconds(&self) -> i64 {
        self.sessions
            .iter()
            .filter(|session| session.status() == SessionStatus::Completed)
            .filter_map(Session::duration_seconds)
            .sum()
    }

    /// Marks the task completed.
    ///
    /// A running session is closed as completed without a focus rating.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the task
    /// is active.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Completed)?;
        let now = clock.utc();
        self.close_running_session(SessionStatus::Completed, now);
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
        Ok(())
    }

    /// Cancels the task, recording the justification as a system comment.
    ///
    /// A running session is closed as abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyJustification`] for a blank
    /// justification and [`TaskDomainError::InvalidStatusTransition`] unless
    /// the task is active.
    pub fn cancel(&mut self, justification: &str, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let reason = normalize_justification(justification)?;
        self.ensure_transition(TaskStatus::Canceled)?;
        let now = clock.utc();
        let comment = Comment::new(CommentKind::CancelJustification, &reason, now)?;

        self.close_running_session(SessionStatus::Abandoned, now);
        self.comments.push(comment);
        self.status = TaskStatus::Canceled;
        self.canceled_at = Some(now);
        Ok(())
    }

    /// Deprioritises the task until the focus queue is next rebuilt.
    ///
    /// Skipping an already skipped-for-now task is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is active.
    pub fn skip_for_now(&mut self) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        self.skip_state = Some(SkipState::ForNow);
        Ok(())
    }

    /// Hides the task from the focus queue for the rest of the day.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyJustification`] for a blank
    /// justification and [`TaskDomainError::TaskNotActive`] unless the task
    /// is active.
    pub fn skip_for_day(
        &mut self,
        justification: &str,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let reason = normalize_justification(justification)?;
        self.ensure_active()?;
        let comment = Comment::new(CommentKind::SkipJustification, &reason, clock.utc())?;

        self.skip_state = Some(SkipState::ForDay {
            justification: reason,
            comment_id: comment.id(),
            returned: false,
        });
        self.comments.push(comment);
        Ok(())
    }

    /// Brings a day-skipped task back into the focus queue.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is active
    /// and [`TaskDomainError::NotSkippedForDay`] when it is not skipped for
    /// the day.
    pub fn return_skipped(&mut self) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        match self.skip_state.as_mut() {
            Some(SkipState::ForDay { returned, .. }) => {
                *returned = true;
                Ok(())
            }
            Some(SkipState::ForNow) | None => Err(TaskDomainError::NotSkippedForDay(self.id)),
        }
    }

    /// Removes any skip state, returning what was cleared.
    ///
    /// Justification comments are kept as history.
    pub fn clear_skip_state(&mut self) -> Option<SkipState> {
        self.skip_state.take()
    }

    /// Clears a skip-for-now, leaving day skips in place.
    ///
    /// Returns whether anything was cleared.
    pub fn clear_transient_skip(&mut self) -> bool {
        let is_transient = self.skip_state.as_ref().is_some_and(SkipState::is_for_now);
        if is_transient {
            self.skip_state = None;
        }
        is_transient
    }

    /// Schedules the task into a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is active
    /// and [`TaskDomainError::TemplateNotSchedulable`] for templates.
    pub fn move_to_sprint(&mut self, sprint_id: SprintId) -> Result<(), TaskDomainError> {
        self.ensure_movable()?;
        self.location = TaskLocation::Sprint(sprint_id);
        self.record_sprint_entry();
        Ok(())
    }

    /// Returns the task to the backlog.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is active
    /// and [`TaskDomainError::TemplateNotSchedulable`] for templates.
    pub fn move_to_backlog(&mut self) -> Result<(), TaskDomainError> {
        self.ensure_movable()?;
        self.location = TaskLocation::Backlog;
        Ok(())
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title and
    /// [`TaskDomainError::TaskNotActive`] unless the task is active.
    pub fn update_title(&mut self, title: &str) -> Result<(), TaskDomainError> {
        let normalized = normalize_title(title)?;
        self.ensure_active()?;
        self.title = normalized;
        Ok(())
    }

    /// Replaces the description; `None` or blank text clears it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is active.
    pub fn update_description(&mut self, description: Option<&str>) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        self.description = description.and_then(normalize_optional);
        Ok(())
    }

    /// Replaces the point allocation wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is active.
    pub fn update_tag_points(&mut self, tag_points: TagPoints) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        self.tag_points = tag_points;
        Ok(())
    }

    /// Sets, replaces, or removes the recurrence rule.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is active.
    /// Turning a task into a template fails with
    /// [`TaskDomainError::TemplateNotSchedulable`] while it sits in a sprint
    /// and [`TaskDomainError::TemplateCannotHoldSession`] while a session
    /// runs.
    pub fn update_recurrence(&mut self, rule: Option<&str>) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        let normalized = rule.map(normalize_rule).transpose()?;
        if normalized.is_some() {
            if !self.location.is_backlog() {
                return Err(TaskDomainError::TemplateNotSchedulable(self.id));
            }
            if self.active_session().is_some() {
                return Err(TaskDomainError::TemplateCannotHoldSession(self.id));
            }
        }
        self.recurrence = normalized;
        Ok(())
    }

    /// Replaces the manual ordering key.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is active.
    pub fn reorder(&mut self, order: i64) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        self.order = order;
        Ok(())
    }

    /// Appends a freeform comment.
    ///
    /// Allowed in every status so history stays editable after completion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyComment`] for blank content.
    pub fn add_comment(
        &mut self,
        content: &str,
        clock: &impl Clock,
    ) -> Result<CommentId, TaskDomainError> {
        let comment = Comment::new(CommentKind::Note, content, clock.utc())?;
        let comment_id = comment.id();
        self.comments.push(comment);
        Ok(comment_id)
    }

    /// Edits a freeform comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CommentNotFound`] for unknown comments,
    /// [`TaskDomainError::SystemCommentProtected`] for justifications, and
    /// [`TaskDomainError::EmptyComment`] for blank content.
    pub fn edit_comment(
        &mut self,
        comment_id: CommentId,
        content: &str,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let task_id = self.id;
        let comment = self
            .comments
            .iter_mut()
            .find(|comment| comment.id() == comment_id)
            .ok_or(TaskDomainError::CommentNotFound {
                task_id,
                comment_id,
            })?;
        if comment.kind().is_system() {
            return Err(TaskDomainError::SystemCommentProtected(comment_id));
        }
        comment.edit(content, clock.utc())
    }

    /// Deletes a freeform comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CommentNotFound`] for unknown comments and
    /// [`TaskDomainError::SystemCommentProtected`] for justifications.
    pub fn remove_comment(&mut self, comment_id: CommentId) -> Result<Comment, TaskDomainError> {
        let position = self
            .comments
            .iter()
            .position(|comment| comment.id() == comment_id)
            .ok_or(TaskDomainError::CommentNotFound {
                task_id: self.id,
                comment_id,
            })?;
        let is_system = self
            .comments
            .get(position)
            .is_some_and(|comment| comment.kind().is_system());
        if is_system {
            return Err(TaskDomainError::SystemCommentProtected(comment_id));
        }
        Ok(self.comments.remove(position))
    }

    /// Starts a live focus session.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is active,
    /// [`TaskDomainError::TemplateCannotHoldSession`] for templates,
    /// [`TaskDomainError::InvalidSessionDuration`] for a zero duration, and
    /// [`TaskDomainError::SessionAlreadyInProgress`] when another session
    /// is running.
    pub fn start_session(
        &mut self,
        duration_minutes: u32,
        clock: &impl Clock,
    ) -> Result<SessionId, TaskDomainError> {
        self.ensure_active()?;
        if self.is_template() {
            return Err(TaskDomainError::TemplateCannotHoldSession(self.id));
        }
        if duration_minutes == 0 {
            return Err(TaskDomainError::InvalidSessionDuration);
        }
        if let Some(running) = self.active_session() {
            return Err(TaskDomainError::SessionAlreadyInProgress {
                task_id: self.id,
                session_id: running.id(),
            });
        }

        let session = Session::start(duration_minutes, clock.utc());
        let session_id = session.id();
        self.sessions.push(session);
        Ok(session_id)
    }

    /// Completes a running session with a focus rating.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SessionNotFound`] for unknown sessions and
    /// [`TaskDomainError::SessionNotInProgress`] for ended ones.
    pub fn end_session(
        &mut self,
        session_id: SessionId,
        focus_level: FocusLevel,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let session = self.running_session_mut(session_id)?;
        session.finish(SessionStatus::Completed, Some(focus_level), clock.utc());
        Ok(())
    }

    /// Abandons a running session.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SessionNotFound`] for unknown sessions and
    /// [`TaskDomainError::SessionNotInProgress`] for ended ones.
    pub fn abandon_session(
        &mut self,
        session_id: SessionId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let session = self.running_session_mut(session_id)?;
        session.finish(SessionStatus::Abandoned, None, clock.utc());
        Ok(())
    }

    /// Records a completed session after the fact.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is active
    /// and [`TaskDomainError::InvalidSessionRange`] when the session does not
    /// end after it starts.
    pub fn add_manual_session(
        &mut self,
        request: ManualSession,
    ) -> Result<SessionId, TaskDomainError> {
        self.ensure_active()?;
        let session = Session::manual(request)?;
        let session_id = session.id();
        self.sessions.push(session);
        Ok(session_id)
    }

    /// Spawns a fresh backlog instance from a recurring template.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotATemplate`] when the task has no
    /// recurrence rule and [`TaskDomainError::TaskNotActive`] when the
    /// template has been retired.
    pub fn spawn_instance(&self, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if !self.is_template() {
            return Err(TaskDomainError::NotATemplate(self.id));
        }
        self.ensure_active()?;

        Ok(Self {
            id: TaskId::new(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: TaskStatus::Active,
            tag_points: self.tag_points.clone(),
            location: TaskLocation::Backlog,
            created_at: clock.utc(),
            completed_at: None,
            canceled_at: None,
            skip_state: None,
            recurrence: None,
            parent_id: Some(self.id),
            comments: Vec::new(),
            sessions: Vec::new(),
            sprint_history: Vec::new(),
            order: self.order,
        })
    }

    const fn ensure_active(&self) -> Result<(), TaskDomainError> {
        if self.status.is_terminal() {
            return Err(TaskDomainError::TaskNotActive {
                task_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    const fn ensure_transition(&self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        Ok(())
    }

    fn ensure_movable(&self) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        if self.is_template() {
            return Err(TaskDomainError::TemplateNotSchedulable(self.id));
        }
        Ok(())
    }

    fn running_session_mut(
        &mut self,
        session_id: SessionId,
    ) -> Result<&mut Session, TaskDomainError> {
        let task_id = self.id;
        let session = self
            .sessions
            .iter_mut()
            .find(|session| session.id() == session_id)
            .ok_or(TaskDomainError::SessionNotFound {
                task_id,
                session_id,
            })?;
        if !session.is_in_progress() {
            return Err(TaskDomainError::SessionNotInProgress {
                session_id,
                status: session.status(),
            });
        }
        Ok(session)
    }

    fn close_running_session(&mut self, status: SessionStatus, now: DateTime<Utc>) {
        if let Some(session) = self
            .sessions
            .iter_mut()
            .find(|session| session.is_in_progress())
        {
            session.finish(status, None, now);
        }
    }

    /// Appends the current sprint to the history unless it is already the
    /// latest entry.
    fn record_sprint_entry(&mut self) {
        if let TaskLocation::Sprint(sprint_id) = self.location {
            if self.sprint_history.last() != Some(&sprint_id) {
                self.sprint_history.push(sprint_id);
            }
        }
    }
}

fn normalize_title(title: &str) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn normalize_justification(justification: &str) -> Result<String, TaskDomainError> {
    let trimmed = justification.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyJustification);
    }
    Ok(trimmed.to_owned())
}

fn normalize_rule(rule: &str) -> Result<String, TaskDomainError> {
    let trimmed = rule.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyRecurrence);
    }
    Ok(trimmed.to_owned())
}

fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
