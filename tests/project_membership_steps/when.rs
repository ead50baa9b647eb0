//! When steps for project membership BDD scenarios.

use super::world::{MembershipWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::domain::TaskStatus;

#[when(r#"the task is added to project "{name}""#)]
fn add_task(world: &mut MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id(&name)?;
    let task_id = world.task_id()?;
    run_async(world.projects.add_task_to_project(project_id, task_id))
        .wrap_err("add task to project")?
        .ok_or_else(|| eyre::eyre!("project {name} or task is missing"))?;
    Ok(())
}

#[when(r#"the task is removed from project "{name}""#)]
fn remove_task(world: &mut MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id(&name)?;
    let task_id = world.task_id()?;
    run_async(world.projects.remove_task_from_project(project_id, task_id))
        .wrap_err("remove task from project")?
        .ok_or_else(|| eyre::eyre!("project {name} is missing"))?;
    Ok(())
}

#[when("the task is marked finished")]
fn mark_finished(world: &mut MembershipWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    run_async(world.tasks.set_status(task_id, TaskStatus::Finished))
        .wrap_err("finish task")?
        .ok_or_else(|| eyre::eyre!("task is missing"))?;
    Ok(())
}

#[when(r#"project "{name}" progress is recomputed"#)]
fn recompute(world: &mut MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id(&name)?;
    run_async(world.projects.recompute_progress(project_id))
        .wrap_err("recompute project progress")?
        .ok_or_else(|| eyre::eyre!("project {name} is missing"))?;
    Ok(())
}

#[when(r#"project "{name}" is deleted"#)]
fn delete_project(world: &mut MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id(&name)?;
    let deleted = run_async(world.projects.delete(project_id)).wrap_err("delete project")?;
    eyre::ensure!(deleted, "project {name} should have been deleted");
    Ok(())
}
