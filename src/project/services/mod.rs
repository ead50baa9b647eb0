//! Application services for project tracking.

mod registry;

pub use registry::{
    CreateProjectRequest, ProjectRegistryError, ProjectRegistryResult, ProjectRegistryService,
};
