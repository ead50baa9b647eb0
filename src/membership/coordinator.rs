//! Coordinator that keeps task bindings and project member lists aligned.

use crate::project::{
    domain::{Progress, Project, ProjectChange, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{Task, TaskChange, TaskId, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while updating task/project membership.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// Task storage failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// Project storage failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
}

/// Result type for membership operations.
pub type MembershipResult<T> = Result<T, MembershipError>;

/// The single writer of `Task::project_id`, `Project::task_ids` and
/// `Project::progress`.
///
/// Writes are ordered task first, then project, then progress. An
/// interrupted sequence therefore leaves the task's binding as the newest
/// fact, which is what [`MembershipCoordinator::reconcile`] trusts.
///
/// Every write is a single [`TaskRepository::modify`] or
/// [`ProjectRepository::modify`] call, so coordinators sharing a store (or
/// processes sharing a database) never overwrite each other's changes.
#[derive(Clone)]
pub struct MembershipCoordinator<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    pub(super) tasks: Arc<T>,
    pub(super) projects: Arc<P>,
    pub(super) clock: Arc<C>,
}

impl<T, P, C> MembershipCoordinator<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator over the given stores.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            clock,
        }
    }

    /// Adds a task to a project, moving it out of any previous project.
    ///
    /// Returns `Ok(None)` when either the project or the task does not
    /// exist. Adding an existing member is a no-op that returns the project
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`] when either store fails.
    pub async fn add_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> MembershipResult<Option<Project>> {
        let Some(current) = self.projects.find_by_id(project_id).await? else {
            return Ok(None);
        };
        let Some(found) = self.tasks.find_by_id(task_id).await? else {
            return Ok(None);
        };
        if current.contains_task(task_id) && found.project_id() == Some(project_id) {
            return Ok(Some(current));
        }

        if let Some(previous) = found.project_id()
            && previous != project_id
        {
            self.remove_task(previous, task_id).await?;
        }

        let bound = self
            .tasks
            .modify(task_id, TaskChange::Bind(project_id), self.clock.utc())
            .await?;
        if bound.is_none() {
            return Ok(None);
        }

        let attached = self
            .projects
            .modify(project_id, ProjectChange::AttachTask(task_id), self.clock.utc())
            .await?;
        if attached.is_none() {
            // The project went away after the task was bound to it.
            self.unbind(task_id, project_id).await?;
            return Ok(None);
        }
        tracing::debug!(project_id = %project_id, task_id = %task_id, "task added to project");

        self.recompute_progress(project_id).await
    }

    /// Removes a task from a project.
    ///
    /// Returns `Ok(None)` when the project does not exist. Removing a task
    /// that is not a member is a no-op that returns the project unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`] when either store fails.
    pub async fn remove_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> MembershipResult<Option<Project>> {
        let Some(project) = self.projects.find_by_id(project_id).await? else {
            return Ok(None);
        };
        if !project.contains_task(task_id) {
            return Ok(Some(project));
        }

        self.unbind(task_id, project_id).await?;
        let detached = self
            .projects
            .modify(project_id, ProjectChange::DetachTask(task_id), self.clock.utc())
            .await?;
        if detached.is_none() {
            return Ok(None);
        }
        tracing::debug!(project_id = %project_id, task_id = %task_id, "task removed from project");

        self.recompute_progress(project_id).await
    }

    /// Detaches a task from whichever project it is bound to.
    ///
    /// Used before a task is deleted. Unbound tasks are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`] when either store fails.
    pub async fn detach_task(&self, task: &Task) -> MembershipResult<()> {
        if let Some(project_id) = task.project_id() {
            self.remove_task(project_id, task.id()).await?;
        }
        Ok(())
    }

    /// Clears the binding of every task that still points at `project_id`.
    ///
    /// Used before a project is deleted. Returns the number of tasks
    /// unbound.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Task`] when task storage fails.
    pub async fn release_members(&self, project_id: ProjectId) -> MembershipResult<usize> {
        let members = self
            .tasks
            .list(&TaskFilter::new().with_project(project_id))
            .await?;

        let mut released = 0_usize;
        for task in members {
            if self.unbind(task.id(), project_id).await? {
                released = released.saturating_add(1);
            }
        }
        tracing::debug!(project_id = %project_id, released, "released project members");
        Ok(released)
    }

    /// Recomputes and stores a project's progress from the tasks bound to
    /// it.
    ///
    /// After each write the member tasks are read again and the write is
    /// repeated until the value matches them. Every status or binding change
    /// is followed by a recompute, so once changes stop the stored value is
    /// the one computed from the final tasks.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`] when either store fails.
    pub async fn recompute_progress(
        &self,
        project_id: ProjectId,
    ) -> MembershipResult<Option<Project>> {
        let mut progress = self.member_progress(project_id).await?;
        loop {
            let Some(project) = self
                .projects
                .modify(project_id, ProjectChange::RecordProgress(progress), self.clock.utc())
                .await?
            else {
                return Ok(None);
            };
            let confirmed = self.member_progress(project_id).await?;
            if confirmed == progress {
                return Ok(Some(project));
            }
            tracing::debug!(project_id = %project_id, "member tasks changed during recompute");
            progress = confirmed;
        }
    }

    /// Returns `true` when a project with `project_id` is stored.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Project`] when lookup fails.
    pub async fn project_exists(&self, project_id: ProjectId) -> MembershipResult<bool> {
        Ok(self.projects.find_by_id(project_id).await?.is_some())
    }

    /// Clears a task's binding if it still points at `project_id`.
    ///
    /// Returns `true` when the task exists and is no longer bound there.
    pub(super) async fn unbind(
        &self,
        task_id: TaskId,
        project_id: ProjectId,
    ) -> MembershipResult<bool> {
        let stored = self
            .tasks
            .modify(task_id, TaskChange::Unbind(project_id), self.clock.utc())
            .await?;
        Ok(stored.is_some_and(|task| task.project_id() != Some(project_id)))
    }

    async fn member_progress(&self, project_id: ProjectId) -> MembershipResult<Progress> {
        let members = self
            .tasks
            .list(&TaskFilter::new().with_project(project_id))
            .await?;
        Ok(progress_of(&members))
    }
}

/// Progress of a set of member tasks.
pub(super) fn progress_of<'a>(members: impl IntoIterator<Item = &'a Task>) -> Progress {
    let (finished, total) = members
        .into_iter()
        .fold((0_usize, 0_usize), |(finished, total), task| {
            let done = usize::from(task.status() == TaskStatus::Finished);
            (finished.saturating_add(done), total.saturating_add(1))
        });
    Progress::from_counts(finished, total)
}
