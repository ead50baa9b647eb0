//! Taskboard: task and project tracking core.
//!
//! Tasks carry status, priority, deadlines and comments; projects group
//! tasks and report how many are finished. The crate keeps the two sides of
//! that relationship consistent and authenticates callers with bearer
//! tokens.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and credentials
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task CRUD, filters, deadlines and comments
//! - [`project`]: Project CRUD and progress
//! - [`membership`]: Task/project consistency layer
//! - [`auth`]: Registration, login and bearer tokens
//! - [`config`]: Environment configuration
//! - [`telemetry`]: Logging bootstrap

pub mod auth;
pub mod config;
pub mod membership;
pub mod project;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
