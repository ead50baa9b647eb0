//! Shared world state for project membership BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::project::{
    adapters::memory::InMemoryProjectRepository, domain::ProjectId,
    services::ProjectRegistryService,
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository, domain::TaskId, services::TaskRegistryService,
};

/// Task registry used by the BDD world.
pub type TestTasks =
    TaskRegistryService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Project registry used by the BDD world.
pub type TestProjects =
    ProjectRegistryService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Scenario world for project membership behaviour tests.
pub struct MembershipWorld {
    pub tasks: TestTasks,
    pub projects: TestProjects,
    pub project_ids: HashMap<String, ProjectId>,
    pub current_task: Option<TaskId>,
}

impl MembershipWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let task_store = Arc::new(InMemoryTaskRepository::new());
        let project_store = Arc::new(InMemoryProjectRepository::new());
        let clock = Arc::new(DefaultClock);

        Self {
            tasks: TaskRegistryService::new(
                Arc::clone(&task_store),
                Arc::clone(&project_store),
                Arc::clone(&clock),
            ),
            projects: ProjectRegistryService::new(project_store, task_store, clock),
            project_ids: HashMap::new(),
            current_task: None,
        }
    }

    /// Returns the id of the project created under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when no project with that name was created.
    pub fn project_id(&self, name: &str) -> eyre::Result<ProjectId> {
        self.project_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no project named {name} in scenario world"))
    }

    /// Returns the task created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created.
    pub fn task_id(&self) -> eyre::Result<TaskId> {
        self.current_task
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for MembershipWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MembershipWorld {
    MembershipWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
