//! Repairing drift between raw stores through the reconcile pass.

use super::helpers::{Board, board};
use crate::test_helpers::ManualClock;
use mockable::Clock;
use rstest::rstest;
use std::sync::Arc;
use taskboard::membership::{MembershipCoordinator, MembershipRepair};
use taskboard::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Progress, ProjectId},
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus},
    ports::TaskRepository,
};

fn bound_task(board: &Board, project_id: ProjectId, status: TaskStatus) -> Task {
    let now = board.clock.utc();
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: "Half-written".to_owned(),
        description: String::new(),
        status,
        priority: TaskPriority::Medium,
        project_id: Some(project_id),
        deadline: None,
        comments: Vec::new(),
        created_at: now,
        updated_at: now,
    })
}

type Coordinator =
    MembershipCoordinator<InMemoryTaskRepository, InMemoryProjectRepository, ManualClock>;

fn coordinator(board: &Board) -> Coordinator {
    MembershipCoordinator::new(
        Arc::clone(&board.task_store),
        Arc::clone(&board.project_store),
        Arc::clone(&board.clock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn interrupted_add_is_completed(board: Board) -> eyre::Result<()> {
    let project_id = board.project("Interrupted").await?;
    let orphan = bound_task(&board, project_id, TaskStatus::Finished);
    board.task_store.store(&orphan).await?;
    eyre::ensure!(
        board.ensure_consistent().await.is_err(),
        "arranged stores should start out inconsistent"
    );

    let report = coordinator(&board).reconcile().await?;

    eyre::ensure!(
        report.added_members
            == [MembershipRepair {
                project_id,
                task_id: orphan.id(),
            }],
        "missing member should be added, got {report:?}"
    );
    eyre::ensure!(report.corrected_progress.len() == 1, "progress should be fixed");
    let project = board
        .projects
        .get(project_id)
        .await?
        .ok_or_else(|| eyre::eyre!("project should exist"))?;
    eyre::ensure!(project.progress() == Progress::COMPLETE, "only member is finished");
    board.ensure_consistent().await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_bound_to_deleted_project_is_released(board: Board) -> eyre::Result<()> {
    let gone = ProjectId::new();
    let orphan = bound_task(&board, gone, TaskStatus::InProgress);
    board.task_store.store(&orphan).await?;

    let report = coordinator(&board).reconcile().await?;

    eyre::ensure!(report.unbound_tasks.len() == 1, "orphan should be unbound");
    let task = board
        .tasks
        .get(orphan.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should still exist"))?;
    eyre::ensure!(task.project_id().is_none(), "binding should be cleared");
    eyre::ensure!(
        task.status() == TaskStatus::InProgress,
        "status should be untouched"
    );
    board.ensure_consistent().await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_reconcile_is_clean(board: Board) -> eyre::Result<()> {
    let project_id = board.project("Stable").await?;
    let task_id = board.task("Member").await?;
    board.projects.add_task_to_project(project_id, task_id).await?;
    board
        .task_store
        .store(&bound_task(&board, project_id, TaskStatus::Backlog))
        .await?;

    let first = coordinator(&board).reconcile().await?;
    let second = coordinator(&board).reconcile().await?;

    eyre::ensure!(!first.is_clean(), "first pass should repair drift");
    eyre::ensure!(second.is_clean(), "second pass should find nothing, got {second:?}");
    Ok(())
}
