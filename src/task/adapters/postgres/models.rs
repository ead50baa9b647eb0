//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Domain task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Task priority.
    pub priority: String,
    /// Owning project identifier.
    pub project_id: Option<uuid::Uuid>,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Comment thread JSON payload.
    pub comments: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Domain task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Task priority.
    pub priority: String,
    /// Owning project identifier.
    pub project_id: Option<uuid::Uuid>,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Comment thread JSON payload.
    pub comments: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when persisting an updated task.
///
/// `None` values are written as `NULL` so that clearing a project binding or
/// a deadline reaches the database.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks, treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Task priority.
    pub priority: String,
    /// Owning project identifier.
    pub project_id: Option<uuid::Uuid>,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Comment thread JSON payload.
    pub comments: Value,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
