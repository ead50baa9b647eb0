//! In-memory repository for projects.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Project, ProjectChange, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    insertion_order: Vec<ProjectId>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }

        state.insertion_order.push(project.id());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .projects
            .get_mut(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        *stored = project.clone();
        Ok(())
    }

    async fn modify(
        &self,
        id: ProjectId,
        change: ProjectChange,
        at: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Option<Project>> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(stored) = state.projects.get_mut(&id) else {
            return Ok(None);
        };
        stored.apply_change(change, at);
        Ok(Some(stored.clone()))
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(poisoned)?;
        let projects = state
            .insertion_order
            .iter()
            .filter_map(|id| state.projects.get(id))
            .cloned()
            .collect();
        Ok(projects)
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.projects.remove(&id).is_none() {
            return Ok(false);
        }
        state.insertion_order.retain(|existing| *existing != id);
        Ok(true)
    }
}
