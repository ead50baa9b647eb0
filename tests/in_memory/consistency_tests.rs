//! Membership consistency across the task and project registries.

use super::helpers::{Board, board};
use rstest::rstest;
use taskboard::project::domain::Progress;
use taskboard::task::{
    domain::{TaskPatch, TaskStatus},
    services::CreateTaskRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn single_task_membership_lifecycle(board: Board) -> eyre::Result<()> {
    let project_id = board.project("P1").await?;
    let task_id = board.task("T1").await?;

    let added = board
        .projects
        .add_task_to_project(project_id, task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("project should exist"))?;
    eyre::ensure!(added.task_ids() == [task_id], "task should be the only member");
    eyre::ensure!(added.progress() == Progress::ZERO, "nothing finished yet");

    board.tasks.set_status(task_id, TaskStatus::Finished).await?;
    let recomputed = board
        .projects
        .recompute_progress(project_id)
        .await?
        .ok_or_else(|| eyre::eyre!("project should exist"))?;
    eyre::ensure!(
        recomputed.progress() == Progress::COMPLETE,
        "finished member should complete the project"
    );

    let removed = board
        .projects
        .remove_task_from_project(project_id, task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("project should exist"))?;
    let task = board
        .tasks
        .get(task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(removed.task_ids().is_empty(), "member list should be empty");
    eyre::ensure!(task.project_id().is_none(), "task should be unbound");
    eyre::ensure!(removed.progress() == Progress::ZERO, "empty project has zero progress");
    board.ensure_consistent().await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mixed_operations_never_break_membership(board: Board) -> eyre::Result<()> {
    let alpha = board.project("Alpha").await?;
    let beta = board.project("Beta").await?;
    let first = board.task("First").await?;
    let second = board.task("Second").await?;
    let bound_on_create = board
        .tasks
        .create(CreateTaskRequest::new("Third", "").with_project(beta))
        .await?
        .ok_or_else(|| eyre::eyre!("task should be created"))?
        .id();
    board.ensure_consistent().await?;

    board.projects.add_task_to_project(alpha, first).await?;
    board.ensure_consistent().await?;
    board.projects.add_task_to_project(alpha, second).await?;
    board.tasks.set_status(second, TaskStatus::Finished).await?;
    board.ensure_consistent().await?;
    board.projects.add_task_to_project(beta, second).await?;
    board.ensure_consistent().await?;
    board.projects.remove_task_from_project(alpha, bound_on_create).await?;
    board.ensure_consistent().await?;
    board
        .tasks
        .update(first, TaskPatch::new().with_title("First, renamed"))
        .await?;
    board.ensure_consistent().await?;
    board.tasks.delete(bound_on_create).await?;
    board.ensure_consistent().await?;
    board.projects.delete(alpha).await?;
    board.ensure_consistent().await?;

    let beta_project = board
        .projects
        .get(beta)
        .await?
        .ok_or_else(|| eyre::eyre!("beta should exist"))?;
    eyre::ensure!(beta_project.task_ids() == [second], "only the moved task remains");
    eyre::ensure!(
        beta_project.progress() == Progress::COMPLETE,
        "moved task is finished"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generic_update_keeps_project_binding(board: Board) -> eyre::Result<()> {
    let project_id = board.project("Pinned").await?;
    let task_id = board.task("Bound").await?;
    board.projects.add_task_to_project(project_id, task_id).await?;

    let updated = board
        .tasks
        .update(task_id, TaskPatch::new().with_description("Edited"))
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;

    eyre::ensure!(
        updated.project_id() == Some(project_id),
        "field updates must not touch membership"
    );
    board.ensure_consistent().await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_members_resolve_to_tasks(board: Board) -> eyre::Result<()> {
    let project_id = board.project("Resolve").await?;
    let first = board.task("First").await?;
    let second = board.task("Second").await?;
    board.projects.add_task_to_project(project_id, second).await?;
    board.projects.add_task_to_project(project_id, first).await?;

    let titles: Vec<String> = board
        .projects
        .project_tasks(project_id)
        .await?
        .iter()
        .map(|task| task.title().to_owned())
        .collect();

    eyre::ensure!(
        titles == ["Second", "First"],
        "members should follow add order, got {titles:?}"
    );
    Ok(())
}
