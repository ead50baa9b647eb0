//! Then steps for project membership BDD scenarios.

use super::world::{MembershipWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::project::domain::Project;
use taskboard::task::domain::Task;

fn stored_project(world: &MembershipWorld, name: &str) -> Result<Project, eyre::Report> {
    let project_id = world.project_id(name)?;
    run_async(world.projects.get(project_id))?
        .ok_or_else(|| eyre::eyre!("project {name} is missing"))
}

fn stored_task(world: &MembershipWorld) -> Result<Task, eyre::Report> {
    let task_id = world.task_id()?;
    run_async(world.tasks.get(task_id))?.ok_or_else(|| eyre::eyre!("task is missing"))
}

#[then(r#"project "{name}" lists {count:usize} member tasks"#)]
fn project_lists(world: &MembershipWorld, name: String, count: usize) -> Result<(), eyre::Report> {
    let project = stored_project(world, &name)?;
    let listed = project.task_ids().len();
    if listed != count {
        return Err(eyre::eyre!(
            "expected {count} members in {name}, found {listed}"
        ));
    }
    Ok(())
}

#[then(r#"project "{name}" progress is {percent:u8}"#)]
fn project_progress(world: &MembershipWorld, name: String, percent: u8) -> Result<(), eyre::Report> {
    let project = stored_project(world, &name)?;
    let actual = project.progress().value();
    if actual != percent {
        return Err(eyre::eyre!(
            "expected {name} progress {percent}, found {actual}"
        ));
    }
    Ok(())
}

#[then("the task has no project")]
fn task_unbound(world: &MembershipWorld) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    if let Some(project_id) = task.project_id() {
        return Err(eyre::eyre!("task is still bound to {project_id}"));
    }
    Ok(())
}

#[then(r#"the task belongs to project "{name}""#)]
fn task_bound_to(world: &MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.project_id(&name)?;
    let task = stored_task(world)?;
    if task.project_id() != Some(expected) {
        return Err(eyre::eyre!(
            "expected task bound to {name}, found {:?}",
            task.project_id()
        ));
    }
    Ok(())
}
