//! Given steps for project membership BDD scenarios.

use super::world::{MembershipWorld, run_async};
use chrono::{TimeDelta, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::project::services::CreateProjectRequest;
use taskboard::task::services::CreateTaskRequest;

#[given(r#"a project "{name}" due tomorrow"#)]
fn project_due_tomorrow(world: &mut MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let deadline = Utc::now() + TimeDelta::days(1);
    let project = run_async(
        world
            .projects
            .create(CreateProjectRequest::new(name.clone(), "", deadline)),
    )
    .wrap_err("create project for membership scenario")?;
    world.project_ids.insert(name, project.id());
    Ok(())
}

#[given(r#"an unbound task "{title}""#)]
fn unbound_task(world: &mut MembershipWorld, title: String) -> Result<(), eyre::Report> {
    let task = run_async(world.tasks.create(CreateTaskRequest::new(title, "")))
        .wrap_err("create task for membership scenario")?
        .ok_or_else(|| eyre::eyre!("unbound task should always be created"))?;
    world.current_task = Some(task.id());
    Ok(())
}
