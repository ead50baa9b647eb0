//! Step definitions for project membership scenarios.

pub mod world;

mod given;
mod then;
mod when;
