//! Service layer for task CRUD, derived queries and comments.

use crate::membership::{MembershipCoordinator, MembershipError};
use crate::project::{domain::ProjectId, ports::ProjectRepository};
use crate::task::{
    domain::{
        Comment, DeadlineWindow, NewTask, Task, TaskChange, TaskId, TaskPatch, TaskPriority,
        TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    priority: TaskPriority,
    project_id: Option<ProjectId>,
    deadline: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields and medium priority.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: TaskPriority::default(),
            project_id: None,
            deadline: None,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Binds the new task to a project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Service-level errors for task registry operations.
#[derive(Debug, Error)]
pub enum TaskRegistryError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Updating project membership failed.
    #[error(transparent)]
    Membership(#[from] MembershipError),
}

/// Result type for task registry operations.
pub type TaskRegistryResult<T> = Result<T, TaskRegistryError>;

/// Task CRUD and query service.
///
/// Anything that touches project membership is delegated to the
/// [`MembershipCoordinator`].
#[derive(Clone)]
pub struct TaskRegistryService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<T>,
    membership: MembershipCoordinator<T, P, C>,
    clock: Arc<C>,
}

impl<T, P, C> TaskRegistryService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task registry service.
    #[must_use]
    pub fn new(repository: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        let membership =
            MembershipCoordinator::new(Arc::clone(&repository), projects, Arc::clone(&clock));
        Self {
            repository,
            membership,
            clock,
        }
    }

    /// Creates a task, binding it to the requested project if any.
    ///
    /// Returns `Ok(None)` when the requested project does not exist; no
    /// task is stored in that case.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError`] when storage fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskRegistryResult<Option<Task>> {
        let CreateTaskRequest {
            title,
            description,
            priority,
            project_id,
            deadline,
        } = request;

        if let Some(requested) = project_id
            && !self.membership.project_exists(requested).await?
        {
            return Ok(None);
        }

        let task = Task::new(
            NewTask {
                title,
                description,
                priority,
                deadline,
            },
            &*self.clock,
        );
        self.repository.store(&task).await?;
        tracing::debug!(task_id = %task.id(), "task created");

        let Some(owner) = project_id else {
            return Ok(Some(task));
        };
        if self.membership.add_task(owner, task.id()).await?.is_none() {
            // The project vanished between the check and the bind.
            self.repository.delete(task.id()).await?;
            return Ok(None);
        }
        Ok(self.repository.find_by_id(task.id()).await?)
    }

    /// Returns a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when lookup fails.
    pub async fn get(&self, id: TaskId) -> TaskRegistryResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns every task in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when lookup fails.
    pub async fn list(&self) -> TaskRegistryResult<Vec<Task>> {
        Ok(self.repository.list(&TaskFilter::new()).await?)
    }

    /// Merges the patch into a task.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when storage fails.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskRegistryResult<Option<Task>> {
        Ok(self
            .repository
            .modify(id, TaskChange::Patch(patch), self.clock.utc())
            .await?)
    }

    /// Changes a task's status and refreshes its project's progress.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError`] when storage fails.
    pub async fn set_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> TaskRegistryResult<Option<Task>> {
        let Some(updated) = self
            .repository
            .modify(id, TaskChange::SetStatus(status), self.clock.utc())
            .await?
        else {
            return Ok(None);
        };
        if let Some(project_id) = updated.project_id() {
            self.membership.recompute_progress(project_id).await?;
        }
        Ok(Some(updated))
    }

    /// Deletes a task after detaching it from its project.
    ///
    /// Returns `Ok(false)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError`] when storage fails.
    pub async fn delete(&self, id: TaskId) -> TaskRegistryResult<bool> {
        let Some(task) = self.repository.find_by_id(id).await? else {
            return Ok(false);
        };
        self.membership.detach_task(&task).await?;
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::debug!(task_id = %id, "task deleted");
        }
        Ok(deleted)
    }

    /// Returns tasks with the given status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when lookup fails.
    pub async fn list_by_status(&self, status: TaskStatus) -> TaskRegistryResult<Vec<Task>> {
        Ok(self
            .repository
            .list(&TaskFilter::new().with_status(status))
            .await?)
    }

    /// Returns tasks with the given priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when lookup fails.
    pub async fn list_by_priority(&self, priority: TaskPriority) -> TaskRegistryResult<Vec<Task>> {
        Ok(self
            .repository
            .list(&TaskFilter::new().with_priority(priority))
            .await?)
    }

    /// Returns tasks bound to the given project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when lookup fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskRegistryResult<Vec<Task>> {
        Ok(self
            .repository
            .list(&TaskFilter::new().with_project(project_id))
            .await?)
    }

    /// Returns tasks whose deadline falls within `window` from now,
    /// bounds included.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when lookup fails.
    pub async fn list_upcoming(&self, window: DeadlineWindow) -> TaskRegistryResult<Vec<Task>> {
        let now = self.clock.utc();
        let tasks = self.repository.list(&TaskFilter::new()).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.is_due_within(now, window))
            .collect())
    }

    /// Returns unfinished tasks whose deadline has passed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when lookup fails.
    pub async fn list_overdue(&self) -> TaskRegistryResult<Vec<Task>> {
        let now = self.clock.utc();
        let tasks = self.repository.list(&TaskFilter::new()).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.is_overdue(now))
            .collect())
    }

    /// Appends a comment to a task.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when storage fails.
    pub async fn add_comment(
        &self,
        task_id: TaskId,
        text: impl Into<String>,
    ) -> TaskRegistryResult<Option<Task>> {
        let comment = Comment::new(text, &*self.clock);
        Ok(self
            .repository
            .modify(task_id, TaskChange::AddComment(comment), self.clock.utc())
            .await?)
    }

    /// Returns a task's comments in insertion order.
    ///
    /// Returns an empty list when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when lookup fails.
    pub async fn list_comments(&self, task_id: TaskId) -> TaskRegistryResult<Vec<Comment>> {
        Ok(self
            .repository
            .find_by_id(task_id)
            .await?
            .map(|task| task.comments().to_vec())
            .unwrap_or_default())
    }
}
