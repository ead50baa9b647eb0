//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use chrono::TimeDelta;
use mockable::Clock;
use rstest::fixture;
use taskboard::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Progress, ProjectId},
    services::{CreateProjectRequest, ProjectRegistryService},
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskId,
    services::{CreateTaskRequest, TaskRegistryService},
};

/// Task registry over in-memory stores.
pub type Tasks = TaskRegistryService<InMemoryTaskRepository, InMemoryProjectRepository, ManualClock>;

/// Project registry over in-memory stores.
pub type Projects =
    ProjectRegistryService<InMemoryTaskRepository, InMemoryProjectRepository, ManualClock>;

/// Both registries sharing one pair of stores and one clock.
pub struct Board {
    /// Task registry.
    pub tasks: Tasks,
    /// Project registry.
    pub projects: Projects,
    /// Raw task store, for arranging drift.
    pub task_store: Arc<InMemoryTaskRepository>,
    /// Raw project store, for arranging drift.
    pub project_store: Arc<InMemoryProjectRepository>,
    /// Shared clock.
    pub clock: Arc<ManualClock>,
}

/// Provides an empty board.
#[fixture]
pub fn board() -> Board {
    let task_store = Arc::new(InMemoryTaskRepository::new());
    let project_store = Arc::new(InMemoryProjectRepository::new());
    let clock = Arc::new(ManualClock::fixed());
    Board {
        tasks: TaskRegistryService::new(
            Arc::clone(&task_store),
            Arc::clone(&project_store),
            Arc::clone(&clock),
        ),
        projects: ProjectRegistryService::new(
            Arc::clone(&project_store),
            Arc::clone(&task_store),
            Arc::clone(&clock),
        ),
        task_store,
        project_store,
        clock,
    }
}

impl Board {
    /// Creates a project due tomorrow.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry rejects the project.
    pub async fn project(&self, name: &str) -> eyre::Result<ProjectId> {
        let deadline = self.clock.utc() + TimeDelta::days(1);
        let project = self
            .projects
            .create(CreateProjectRequest::new(name, "", deadline))
            .await?;
        Ok(project.id())
    }

    /// Creates an unbound task.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry rejects the task.
    pub async fn task(&self, title: &str) -> eyre::Result<TaskId> {
        let task = self
            .tasks
            .create(CreateTaskRequest::new(title, ""))
            .await?
            .ok_or_else(|| eyre::eyre!("task {title} was not created"))?;
        Ok(task.id())
    }

    /// Checks that every binding is mirrored by a member entry and back,
    /// and that progress matches the finished share of members.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first disagreement found.
    pub async fn ensure_consistent(&self) -> eyre::Result<()> {
        let projects = self.projects.list().await?;
        let tasks = self.tasks.list().await?;

        for task in &tasks {
            if let Some(project_id) = task.project_id() {
                let owner = projects
                    .iter()
                    .find(|project| project.id() == project_id)
                    .ok_or_else(|| eyre::eyre!("task {} bound to missing project", task.id()))?;
                eyre::ensure!(
                    owner.contains_task(task.id()),
                    "project {project_id} does not list bound task {}",
                    task.id()
                );
            }
        }

        for project in &projects {
            let mut finished = 0_usize;
            for member in project.task_ids() {
                let task = tasks
                    .iter()
                    .find(|task| task.id() == *member)
                    .ok_or_else(|| eyre::eyre!("project lists missing task {member}"))?;
                eyre::ensure!(
                    task.project_id() == Some(project.id()),
                    "task {member} does not point back at project {}",
                    project.id()
                );
                if task.status().is_finished() {
                    finished = finished.saturating_add(1);
                }
            }
            let expected = Progress::from_counts(finished, project.task_ids().len());
            eyre::ensure!(
                project.progress() == expected,
                "project {} progress {} but expected {expected}",
                project.id(),
                project.progress()
            );
        }
        Ok(())
    }
}
