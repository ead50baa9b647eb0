//! Service layer for project CRUD, membership and progress.

use crate::membership::{MembershipCoordinator, MembershipError};
use crate::project::{
    domain::{NewProject, Project, ProjectChange, ProjectId, ProjectPatch},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
    deadline: DateTime<Utc>,
}

impl CreateProjectRequest {
    /// Creates a request with every project field.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            deadline,
        }
    }
}

/// Service-level errors for project registry operations.
#[derive(Debug, Error)]
pub enum ProjectRegistryError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Reading member tasks failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// Updating project membership failed.
    #[error(transparent)]
    Membership(#[from] MembershipError),
}

/// Result type for project registry operations.
pub type ProjectRegistryResult<T> = Result<T, ProjectRegistryError>;

/// Project CRUD and membership service.
#[derive(Clone)]
pub struct ProjectRegistryService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<P>,
    tasks: Arc<T>,
    membership: MembershipCoordinator<T, P, C>,
    clock: Arc<C>,
}

impl<T, P, C> ProjectRegistryService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project registry service.
    #[must_use]
    pub fn new(repository: Arc<P>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        let membership = MembershipCoordinator::new(
            Arc::clone(&tasks),
            Arc::clone(&repository),
            Arc::clone(&clock),
        );
        Self {
            repository,
            tasks,
            membership,
            clock,
        }
    }

    /// Creates an empty project with zero progress.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when storage fails.
    pub async fn create(&self, request: CreateProjectRequest) -> ProjectRegistryResult<Project> {
        let CreateProjectRequest {
            name,
            description,
            deadline,
        } = request;
        let project = Project::new(
            NewProject {
                name,
                description,
                deadline,
            },
            &*self.clock,
        );
        self.repository.store(&project).await?;
        tracing::debug!(project_id = %project.id(), "project created");
        Ok(project)
    }

    /// Returns a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when lookup fails.
    pub async fn get(&self, id: ProjectId) -> ProjectRegistryResult<Option<Project>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns every project in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when lookup fails.
    pub async fn list(&self) -> ProjectRegistryResult<Vec<Project>> {
        Ok(self.repository.list().await?)
    }

    /// Merges the patch into a project.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when storage fails.
    pub async fn update(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> ProjectRegistryResult<Option<Project>> {
        Ok(self
            .repository
            .modify(id, ProjectChange::Patch(patch), self.clock.utc())
            .await?)
    }

    /// Deletes a project after unbinding its member tasks.
    ///
    /// Returns `Ok(false)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError`] when storage fails.
    pub async fn delete(&self, id: ProjectId) -> ProjectRegistryResult<bool> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.membership.release_members(id).await?;
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::debug!(project_id = %id, "project deleted");
        }
        Ok(deleted)
    }

    /// Returns member tasks in member-list order.
    ///
    /// Ids that no longer resolve are skipped. Returns an empty list when
    /// the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError`] when lookup fails.
    pub async fn project_tasks(&self, id: ProjectId) -> ProjectRegistryResult<Vec<Task>> {
        let Some(project) = self.repository.find_by_id(id).await? else {
            return Ok(Vec::new());
        };
        let mut members = Vec::with_capacity(project.task_ids().len());
        for task_id in project.task_ids() {
            members.extend(self.tasks.find_by_id(*task_id).await?);
        }
        Ok(members)
    }

    /// Recomputes a project's progress from its bound tasks.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError`] when storage fails.
    pub async fn recompute_progress(
        &self,
        id: ProjectId,
    ) -> ProjectRegistryResult<Option<Project>> {
        Ok(self.membership.recompute_progress(id).await?)
    }

    /// Adds a task to a project, moving it out of any previous project.
    ///
    /// Returns `Ok(None)` when the project or the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError`] when storage fails.
    pub async fn add_task_to_project(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> ProjectRegistryResult<Option<Project>> {
        Ok(self.membership.add_task(project_id, task_id).await?)
    }

    /// Removes a task from a project.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError`] when storage fails.
    pub async fn remove_task_from_project(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> ProjectRegistryResult<Option<Project>> {
        Ok(self.membership.remove_task(project_id, task_id).await?)
    }
}
