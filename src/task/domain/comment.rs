//! Comments appended to tasks.

use super::CommentId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Free-text note attached to a task.
///
/// Comments are append-only and owned by exactly one task; their order in
/// [`super::Task::comments`] is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    text: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment stamped with the current clock time.
    #[must_use]
    pub fn new(text: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: CommentId::new(),
            text: text.into(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: CommentId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
