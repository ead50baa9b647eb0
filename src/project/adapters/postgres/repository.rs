//! `PostgreSQL` repository implementation for project storage.

use super::{
    models::{NewProjectRow, ProjectChangeset, ProjectRow},
    schema::projects,
};
use crate::project::{
    domain::{PersistedProjectData, Progress, Project, ProjectChange, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by project adapters.
pub type ProjectPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: ProjectPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProjectPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = to_new_row(project);

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let changeset = to_changeset(project);

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                projects::table.filter(projects::id.eq(project_id.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(ProjectRepositoryError::persistence)?;
            if affected == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn modify(
        &self,
        id: ProjectId,
        change: ProjectChange,
        at: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx_conn| {
                let row = projects::table
                    .filter(projects::id.eq(id.into_inner()))
                    .select(ProjectRow::as_select())
                    .for_update()
                    .first::<ProjectRow>(tx_conn)
                    .optional()?;
                let Some(locked) = row else {
                    return Ok(None);
                };

                let mut project = row_to_project(locked)?;
                project.apply_change(change, at);
                diesel::update(projects::table.filter(projects::id.eq(id.into_inner())))
                    .set(&to_changeset(&project))
                    .execute(tx_conn)?;
                Ok(Some(project))
            })
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .select(ProjectRow::as_select())
                .order(projects::row_id.asc())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(projects::table.filter(projects::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(ProjectRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

fn member_uuids(project: &Project) -> Vec<uuid::Uuid> {
    project
        .task_ids()
        .iter()
        .map(|task_id| task_id.into_inner())
        .collect()
}

fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().to_owned(),
        deadline: project.deadline(),
        task_ids: member_uuids(project),
        progress: i16::from(project.progress().value()),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn to_changeset(project: &Project) -> ProjectChangeset {
    ProjectChangeset {
        name: project.name().to_owned(),
        description: project.description().to_owned(),
        deadline: project.deadline(),
        task_ids: member_uuids(project),
        progress: i16::from(project.progress().value()),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
        deadline,
        task_ids,
        progress: persisted_progress,
        created_at,
        updated_at,
    } = row;

    let progress = Progress::new(i64::from(persisted_progress))
        .map_err(ProjectRepositoryError::persistence)?;

    let data = PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name,
        description,
        deadline,
        task_ids: task_ids.into_iter().map(TaskId::from_uuid).collect(),
        progress,
        created_at,
        updated_at,
    };
    Ok(Project::from_persisted(data))
}
