//! Storage failures must surface as errors rather than empty results.

use std::sync::Arc;

use crate::membership::MembershipError;
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Project, ProjectChange, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskChange, TaskId},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{CreateTaskRequest, TaskRegistryError, TaskRegistryService},
};
use crate::test_support::ManualClock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use rstest::rstest;

mock! {
    pub TaskStore {}

    #[async_trait]
    impl TaskRepository for TaskStore {
        async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn modify(
            &self,
            id: TaskId,
            change: TaskChange,
            at: DateTime<Utc>,
        ) -> TaskRepositoryResult<Option<Task>>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
    }
}

mock! {
    pub ProjectStore {}

    #[async_trait]
    impl ProjectRepository for ProjectStore {
        async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;
        async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;
        async fn modify(
            &self,
            id: ProjectId,
            change: ProjectChange,
            at: DateTime<Utc>,
        ) -> ProjectRepositoryResult<Option<Project>>;
        async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;
        async fn list(&self) -> ProjectRepositoryResult<Vec<Project>>;
        async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool>;
    }
}

fn disk_error() -> std::io::Error {
    std::io::Error::other("disk unavailable")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_failure_is_reported() {
    let mut store = MockTaskStore::new();
    store
        .expect_list()
        .returning(|_| Err(TaskRepositoryError::persistence(disk_error())));
    let service = TaskRegistryService::new(
        Arc::new(store),
        Arc::new(InMemoryProjectRepository::new()),
        Arc::new(ManualClock::fixed()),
    );

    let result = service.list_overdue().await;

    assert!(matches!(
        result,
        Err(TaskRegistryError::Repository(TaskRepositoryError::Persistence(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookup_failure_is_not_treated_as_missing() {
    let mut store = MockTaskStore::new();
    store
        .expect_find_by_id()
        .returning(|_| Err(TaskRepositoryError::persistence(disk_error())));
    let service = TaskRegistryService::new(
        Arc::new(store),
        Arc::new(InMemoryProjectRepository::new()),
        Arc::new(ManualClock::fixed()),
    );

    let result = service.list_comments(TaskId::new()).await;

    assert!(result.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_lookup_failure_aborts_bound_creation() {
    let mut projects = MockProjectStore::new();
    projects
        .expect_find_by_id()
        .returning(|_| Err(ProjectRepositoryError::persistence(disk_error())));
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let service = TaskRegistryService::new(
        Arc::clone(&tasks),
        Arc::new(projects),
        Arc::new(ManualClock::fixed()),
    );

    let result = service
        .create(CreateTaskRequest::new("Bound", "").with_project(ProjectId::new()))
        .await;

    assert!(matches!(
        result,
        Err(TaskRegistryError::Membership(MembershipError::Project(
            ProjectRepositoryError::Persistence(_)
        )))
    ));
    let stored = tasks
        .list(&TaskFilter::new())
        .await
        .expect("in-memory list");
    assert!(stored.is_empty());
}
