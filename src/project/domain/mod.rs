//! Domain model for projects.
//!
//! A project groups tasks and tracks how many of them are finished.

mod error;
mod ids;
mod progress;
mod project;

pub use error::ProjectDomainError;
pub use ids::ProjectId;
pub use progress::Progress;
pub use project::{NewProject, PersistedProjectData, Project, ProjectChange, ProjectPatch};
