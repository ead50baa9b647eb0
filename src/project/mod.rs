//! Project tracking.
//!
//! Projects group tasks and expose their completion percentage. Member
//! lists and progress are maintained through [`crate::membership`]; the
//! registry only edits name, description and deadline directly.
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
