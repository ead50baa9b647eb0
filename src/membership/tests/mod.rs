//! Unit tests for the task/project consistency layer.


use std::sync::Arc;

use crate::membership::MembershipCoordinator;
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{NewProject, Project, ProjectId},
    ports::ProjectRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, Task, TaskId, TaskPriority},
    ports::{TaskFilter, TaskRepository},
};
use crate::test_support::ManualClock;
use chrono::TimeDelta;
use mockable::Clock;

type Coordinator =
    MembershipCoordinator<InMemoryTaskRepository, InMemoryProjectRepository, ManualClock>;

/// Coordinator wired to in-memory stores that tests can also write to
/// directly.
struct Stores {
    tasks: Arc<InMemoryTaskRepository>,
    projects: Arc<InMemoryProjectRepository>,
    clock: Arc<ManualClock>,
    coordinator: Coordinator,
}

impl Stores {
    fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let clock = Arc::new(ManualClock::fixed());
        let coordinator = MembershipCoordinator::new(
            Arc::clone(&tasks),
            Arc::clone(&projects),
            Arc::clone(&clock),
        );
        Self {
            tasks,
            projects,
            clock,
            coordinator,
        }
    }

    fn new_task(&self, title: &str) -> Task {
        Task::new(
            NewTask {
                title: title.to_owned(),
                description: String::new(),
                priority: TaskPriority::Medium,
                deadline: None,
            },
            &*self.clock,
        )
    }

    fn new_project(&self, name: &str) -> Project {
        Project::new(
            NewProject {
                name: name.to_owned(),
                description: String::new(),
                deadline: self.clock.utc() + TimeDelta::days(1),
            },
            &*self.clock,
        )
    }

    async fn store_task(&self, task: &Task) -> TaskId {
        self.tasks.store(task).await.expect("task store should succeed");
        task.id()
    }

    async fn store_project(&self, project: &Project) -> ProjectId {
        self.projects
            .store(project)
            .await
            .expect("project store should succeed");
        project.id()
    }

    async fn task(&self, id: TaskId) -> Task {
        self.tasks
            .find_by_id(id)
            .await
            .expect("lookup should succeed")
            .expect("task should exist")
    }

    async fn project(&self, id: ProjectId) -> Project {
        self.projects
            .find_by_id(id)
            .await
            .expect("lookup should succeed")
            .expect("project should exist")
    }

    /// Asserts that every binding is mirrored by a member entry and back.
    async fn assert_consistent(&self) {
        let projects = self.projects.list().await.expect("list projects");
        let tasks = self
            .tasks
            .list(&TaskFilter::new())
            .await
            .expect("list tasks");

        for task in &tasks {
            if let Some(project_id) = task.project_id() {
                let owner = projects
                    .iter()
                    .find(|project| project.id() == project_id)
                    .expect("bound project should exist");
                assert!(owner.contains_task(task.id()));
            }
        }
        for project in &projects {
            for member in project.task_ids() {
                let task = tasks
                    .iter()
                    .find(|task| task.id() == *member)
                    .expect("listed task should exist");
                assert_eq!(task.project_id(), Some(project.id()));
            }
        }
    }
}
