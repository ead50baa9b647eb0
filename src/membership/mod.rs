//! Task/project consistency layer.
//!
//! [`MembershipCoordinator`] is the only code path that changes a task's
//! project binding, a project's member list or its progress. Both
//! registries delegate to it so that:
//!
//! - every bound task is listed by its project,
//! - every listed task is bound to the project that lists it,
//! - progress always reflects the finished share of bound tasks.
//!
//! [`MembershipCoordinator::reconcile`] restores these rules after an
//! interrupted multi-step write.

mod coordinator;
mod reconcile;

pub use coordinator::{MembershipCoordinator, MembershipError, MembershipResult};
pub use reconcile::{MembershipRepair, ProgressCorrection, ReconciliationReport};

#[cfg(test)]
mod tests;
