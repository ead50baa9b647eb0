//! Completion percentage derived from member task statuses.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of a project's member tasks that are finished, as a whole
/// percentage in `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Progress(u8);

impl Progress {
    /// Progress of a project with no finished tasks, or with no tasks at all.
    pub const ZERO: Self = Self(0);

    /// Progress of a project whose tasks are all finished.
    pub const COMPLETE: Self = Self(100);

    /// Creates a validated progress value.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidProgress`] when `value` is not in
    /// `0..=100`.
    pub fn new(value: i64) -> Result<Self, ProjectDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|percent| *percent <= 100)
            .map(Self)
            .ok_or(ProjectDomainError::InvalidProgress(value))
    }

    /// Computes `round(100 * finished / total)`, rounding halves up.
    ///
    /// An empty project has zero progress. `finished` is clamped to `total`.
    #[must_use]
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "half-up rounding is computed exactly in integer arithmetic"
    )]
    pub fn from_counts(finished: usize, total: usize) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let done = finished.min(total);
        let scaled = done.saturating_mul(200).saturating_add(total);
        let percent = scaled / total.saturating_mul(2);
        Self(u8::try_from(percent).unwrap_or(100).min(100))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Progress {
    type Error = ProjectDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for i64 {
    fn from(progress: Progress) -> Self {
        Self::from(progress.0)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
