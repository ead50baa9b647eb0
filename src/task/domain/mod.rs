//! Domain model for task tracking.
//!
//! Tasks carry workflow status, priority, an optional deadline, an
//! append-only comment thread and an optional binding to a project. All
//! infrastructure concerns stay outside of the domain boundary.

mod comment;
mod deadline;
mod error;
mod ids;
mod status;
mod task;

pub use comment::Comment;
pub use deadline::{DeadlineWindow, parse_deadline};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{CommentId, TaskId};
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskChange, TaskPatch};
