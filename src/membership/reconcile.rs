//! Repair pass that restores agreement between task bindings and project
//! member lists.

use super::coordinator::{MembershipCoordinator, MembershipResult, progress_of};
use crate::project::{
    domain::{Progress, ProjectChange, ProjectId},
    ports::ProjectRepository,
};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskFilter, TaskRepository},
};
use mockable::Clock;
use std::collections::{HashMap, HashSet};

/// A single membership fact that the pass changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipRepair {
    /// Project involved in the repair.
    pub project_id: ProjectId,
    /// Task involved in the repair.
    pub task_id: TaskId,
}

/// A stored progress value that disagreed with the member tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressCorrection {
    /// Corrected project.
    pub project_id: ProjectId,
    /// Value found in storage.
    pub previous: Progress,
    /// Value recomputed from member tasks.
    pub current: Progress,
}

/// Outcome of [`MembershipCoordinator::reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Tasks that pointed at a project that no longer exists; the project
    /// id is the missing one.
    pub unbound_tasks: Vec<MembershipRepair>,
    /// Member ids dropped because the task is missing or bound elsewhere.
    pub removed_members: Vec<MembershipRepair>,
    /// Member ids appended because the task was bound but not listed.
    pub added_members: Vec<MembershipRepair>,
    /// Projects whose stored progress was wrong.
    pub corrected_progress: Vec<ProgressCorrection>,
}

impl ReconciliationReport {
    /// Returns `true` when the pass found nothing to repair.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unbound_tasks.is_empty()
            && self.removed_members.is_empty()
            && self.added_members.is_empty()
            && self.corrected_progress.is_empty()
    }
}

impl<T, P, C> MembershipCoordinator<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Rebuilds every project's member list and progress from the task
    /// bindings.
    ///
    /// Each task's `project_id` is authoritative. Tasks pointing at a
    /// missing project are unbound. Member lists keep their existing valid
    /// order, drop ids that do not point back, and gain bound tasks that
    /// were missing. Progress is rewritten where it disagrees.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`](super::MembershipError) when either
    /// store fails.
    pub async fn reconcile(&self) -> MembershipResult<ReconciliationReport> {
        let mut report = ReconciliationReport::default();
        let projects = self.projects.list().await?;
        let known: HashSet<ProjectId> = projects.iter().map(|project| project.id()).collect();

        let mut bound: HashMap<ProjectId, Vec<Task>> = HashMap::new();
        for task in self.tasks.list(&TaskFilter::new()).await? {
            let Some(project_id) = task.project_id() else {
                continue;
            };
            if known.contains(&project_id) {
                bound.entry(project_id).or_default().push(task);
                continue;
            }

            tracing::warn!(
                task_id = %task.id(),
                project_id = %project_id,
                "task bound to missing project - unbinding"
            );
            self.unbind(task.id(), project_id).await?;
            report.unbound_tasks.push(MembershipRepair {
                project_id,
                task_id: task.id(),
            });
        }

        for project in projects {
            let project_id = project.id();
            let members = bound.remove(&project_id).unwrap_or_default();
            let member_ids: Vec<TaskId> = members.iter().map(Task::id).collect();

            let (rebuilt, removed, added) = rebuild_members(project.task_ids(), &member_ids);
            let membership_changed = !removed.is_empty() || !added.is_empty();
            for task_id in removed {
                tracing::warn!(
                    project_id = %project_id,
                    task_id = %task_id,
                    "stale project member - removing"
                );
                report
                    .removed_members
                    .push(MembershipRepair { project_id, task_id });
            }
            for task_id in added {
                tracing::warn!(
                    project_id = %project_id,
                    task_id = %task_id,
                    "bound task missing from project - adding"
                );
                report
                    .added_members
                    .push(MembershipRepair { project_id, task_id });
            }
            if membership_changed {
                self.projects
                    .modify(
                        project_id,
                        ProjectChange::ReplaceTasks(rebuilt),
                        self.clock.utc(),
                    )
                    .await?;
            }

            let previous = project.progress();
            let current = progress_of(&members);
            let progress_changed = previous != current;
            if progress_changed {
                tracing::warn!(
                    project_id = %project_id,
                    previous = %previous,
                    current = %current,
                    "stale project progress - correcting"
                );
                self.projects
                    .modify(
                        project_id,
                        ProjectChange::RecordProgress(current),
                        self.clock.utc(),
                    )
                    .await?;
                report.corrected_progress.push(ProgressCorrection {
                    project_id,
                    previous,
                    current,
                });
            }
        }

        if report.is_clean() {
            tracing::debug!("membership reconciliation found no drift");
        }
        Ok(report)
    }
}

/// Returns the rebuilt member list with the ids removed from and appended
/// to `current`.
fn rebuild_members(
    current: &[TaskId],
    bound: &[TaskId],
) -> (Vec<TaskId>, Vec<TaskId>, Vec<TaskId>) {
    let bound_set: HashSet<TaskId> = bound.iter().copied().collect();
    let mut seen = HashSet::with_capacity(bound.len());
    let mut rebuilt = Vec::with_capacity(bound.len());
    let mut removed = Vec::new();

    for task_id in current {
        if bound_set.contains(task_id) && seen.insert(*task_id) {
            rebuilt.push(*task_id);
        } else {
            removed.push(*task_id);
        }
    }

    let mut added = Vec::new();
    for task_id in bound {
        if seen.insert(*task_id) {
            rebuilt.push(*task_id);
            added.push(*task_id);
        }
    }
    (rebuilt, removed, added)
}
