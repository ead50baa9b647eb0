//! Task aggregate root and its partial-update payload.

use super::{Comment, DeadlineWindow, TaskId, TaskPriority, TaskStatus};
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// The project binding is deliberately read-only outside the crate: it is
/// changed only by the membership coordinator so that a task's `project_id`
/// and the owning project's member list never diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    project_id: Option<ProjectId>,
    deadline: Option<DateTime<Utc>>,
    comments: Vec<Comment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new, unbound task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Short task title.
    pub title: String,
    /// Longer task description.
    pub description: String,
    /// Task priority.
    pub priority: TaskPriority,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted project binding, if any.
    pub project_id: Option<ProjectId>,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted comments in insertion order.
    pub comments: Vec<Comment>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update for the editable fields of a task.
///
/// Project membership and workflow status are absent on purpose: membership
/// changes go through the membership coordinator and status changes through
/// the registry's `set_status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    deadline: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets a new deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(Some(deadline));
        self
    }

    /// Removes the deadline.
    #[must_use]
    pub const fn clear_deadline(mut self) -> Self {
        self.deadline = Some(None);
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.deadline.is_none()
    }
}

impl Task {
    /// Creates a new unbound task in the backlog.
    #[must_use]
    pub fn new(new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let NewTask {
            title,
            description,
            priority,
            deadline,
        } = new_task;

        Self {
            id: TaskId::new(),
            title,
            description,
            status: TaskStatus::Backlog,
            priority,
            project_id: None,
            deadline,
            comments: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            project_id: data.project_id,
            deadline: data.deadline,
            comments: data.comments,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the owning project, if the task is bound to one.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns comments in insertion order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the deadline has passed and the task is not
    /// finished.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_finished() && self.deadline.is_some_and(|deadline| deadline < now)
    }

    /// Returns `true` when the deadline falls inside `window` starting at
    /// `now`.
    #[must_use]
    pub fn is_due_within(&self, now: DateTime<Utc>, window: DeadlineWindow) -> bool {
        self.deadline
            .is_some_and(|deadline| window.contains(now, deadline))
    }

    /// Merges the provided fields and refreshes the modification timestamp.
    pub fn apply_patch(&mut self, patch: TaskPatch, clock: &impl Clock) {
        self.apply_change(TaskChange::Patch(patch), clock.utc());
    }

    /// Changes the workflow status.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.apply_change(TaskChange::SetStatus(status), clock.utc());
    }

    /// Appends a comment and returns a copy of it.
    pub fn add_comment(&mut self, text: impl Into<String>, clock: &impl Clock) -> Comment {
        let comment = Comment::new(text, clock);
        self.apply_change(TaskChange::AddComment(comment.clone()), clock.utc());
        comment
    }

    /// Applies a single change stamped at `at`.
    ///
    /// [`TaskChange::Unbind`] leaves a task bound to a different project
    /// untouched, including its `updated_at`.
    pub fn apply_change(&mut self, change: TaskChange, at: DateTime<Utc>) {
        match change {
            TaskChange::Patch(TaskPatch {
                title,
                description,
                priority,
                deadline,
            }) => {
                if let Some(value) = title {
                    self.title = value;
                }
                if let Some(value) = description {
                    self.description = value;
                }
                if let Some(value) = priority {
                    self.priority = value;
                }
                if let Some(value) = deadline {
                    self.deadline = value;
                }
            }
            TaskChange::SetStatus(status) => self.status = status,
            TaskChange::AddComment(comment) => self.comments.push(comment),
            TaskChange::Bind(project_id) => self.project_id = Some(project_id),
            TaskChange::Unbind(project_id) => {
                if self.project_id != Some(project_id) {
                    return;
                }
                self.project_id = None;
            }
        }
        self.updated_at = at.max(self.created_at);
    }
}

/// One mutation of a stored task.
///
/// Repositories apply a change against the latest stored state in a single
/// step, so a status change racing a rebind keeps both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskChange {
    /// Merge editable fields.
    Patch(TaskPatch),
    /// Change the workflow status.
    SetStatus(TaskStatus),
    /// Append a comment.
    AddComment(Comment),
    /// Bind to a project, replacing any previous binding.
    Bind(ProjectId),
    /// Clear the binding if it still points at this project.
    Unbind(ProjectId),
}
