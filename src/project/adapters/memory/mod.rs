//! In-memory adapters for project tracking.

mod project;

pub use project::InMemoryProjectRepository;
