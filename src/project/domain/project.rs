//! Project aggregate root and its partial-update payload.

use super::{Progress, ProjectId};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
///
/// `task_ids` is an ordered set: it never holds duplicates and keeps
/// insertion order for display. Membership and progress are mutated only
/// by the membership coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    deadline: DateTime<Utc>,
    task_ids: Vec<TaskId>,
    progress: Progress,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Project deadline.
    pub deadline: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted member task identifiers in display order.
    pub task_ids: Vec<TaskId>,
    /// Persisted progress.
    pub progress: Progress,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update for the editable fields of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    name: Option<String>,
    description: Option<String>,
    deadline: Option<DateTime<Utc>>,
}

impl ProjectPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

impl Project {
    /// Creates a new project with no tasks and zero progress.
    #[must_use]
    pub fn new(new_project: NewProject, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let NewProject {
            name,
            description,
            deadline,
        } = new_project;

        Self {
            id: ProjectId::new(),
            name,
            description,
            deadline,
            task_ids: Vec::new(),
            progress: Progress::ZERO,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            deadline: data.deadline,
            task_ids: data.task_ids,
            progress: data.progress,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns member task identifiers in display order.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns `true` when `task_id` is a member.
    #[must_use]
    pub fn contains_task(&self, task_id: TaskId) -> bool {
        self.task_ids.contains(&task_id)
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
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

    /// Merges the provided fields and refreshes the modification timestamp.
    pub fn apply_patch(&mut self, patch: ProjectPatch, clock: &impl Clock) {
        self.apply_change(ProjectChange::Patch(patch), clock.utc());
    }

    /// Applies a single change stamped at `at`.
    ///
    /// Attaching an existing member leaves the project untouched, including
    /// its `updated_at`.
    pub fn apply_change(&mut self, change: ProjectChange, at: DateTime<Utc>) {
        match change {
            ProjectChange::Patch(ProjectPatch {
                name,
                description,
                deadline,
            }) => {
                if let Some(value) = name {
                    self.name = value;
                }
                if let Some(value) = description {
                    self.description = value;
                }
                if let Some(value) = deadline {
                    self.deadline = value;
                }
            }
            ProjectChange::AttachTask(task_id) => {
                if self.contains_task(task_id) {
                    return;
                }
                self.task_ids.push(task_id);
            }
            ProjectChange::DetachTask(task_id) => {
                self.task_ids.retain(|existing| *existing != task_id);
            }
            ProjectChange::ReplaceTasks(task_ids) => self.task_ids = task_ids,
            ProjectChange::RecordProgress(progress) => self.progress = progress,
        }
        self.updated_at = at.max(self.created_at);
    }
}

/// One mutation of a stored project.
///
/// Repositories apply a change against the latest stored state in a single
/// step, so concurrent changes to the same project do not overwrite each
/// other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectChange {
    /// Merge editable fields.
    Patch(ProjectPatch),
    /// Append a member unless already present.
    AttachTask(TaskId),
    /// Remove a member.
    DetachTask(TaskId),
    /// Replace the member list wholesale.
    ReplaceTasks(Vec<TaskId>),
    /// Store a recomputed progress value.
    RecordProgress(Progress),
}
