//! Diesel row models for project persistence.

use super::schema::projects;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Domain project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Project deadline.
    pub deadline: DateTime<Utc>,
    /// Member task identifiers.
    pub task_ids: Vec<uuid::Uuid>,
    /// Completion percentage.
    pub progress: i16,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Domain project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Project deadline.
    pub deadline: DateTime<Utc>,
    /// Member task identifiers.
    pub task_ids: Vec<uuid::Uuid>,
    /// Completion percentage.
    pub progress: i16,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when persisting an updated project.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
pub struct ProjectChangeset {
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Project deadline.
    pub deadline: DateTime<Utc>,
    /// Member task identifiers.
    pub task_ids: Vec<uuid::Uuid>,
    /// Completion percentage.
    pub progress: i16,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
