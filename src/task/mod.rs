//! Task tracking.
//!
//! Tasks carry a workflow status, a priority, an optional deadline and an
//! append-only comment thread. A task may belong to one project; that
//! binding is owned by [`crate::membership`]. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
