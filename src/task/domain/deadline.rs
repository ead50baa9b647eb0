//! Deadline parsing and look-ahead windows.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

/// Look-ahead window, in whole days, used to select upcoming deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeadlineWindow(u32);

impl DeadlineWindow {
    /// Window applied when callers do not request a specific span.
    pub const DEFAULT_DAYS: u32 = 7;

    /// Creates a validated window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDeadlineWindow`] when `days` is zero.
    pub const fn new(days: u32) -> Result<Self, TaskDomainError> {
        if days == 0 {
            return Err(TaskDomainError::InvalidDeadlineWindow(days));
        }
        Ok(Self(days))
    }

    /// Returns the window length in days.
    #[must_use]
    pub const fn days(self) -> u32 {
        self.0
    }

    /// Returns `true` when `deadline` lies in `[now, now + days]`.
    ///
    /// Both bounds are inclusive.
    #[must_use]
    pub fn contains(self, now: DateTime<Utc>, deadline: DateTime<Utc>) -> bool {
        let end = TimeDelta::try_days(i64::from(self.0))
            .and_then(|span| now.checked_add_signed(span))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        deadline >= now && deadline <= end
    }
}

impl Default for DeadlineWindow {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

/// Parses a deadline supplied at the request boundary.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates, which resolve to
/// midnight UTC.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDeadline`] when the value matches
/// neither format.
pub fn parse_deadline(value: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    let trimmed = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TaskDomainError::InvalidDeadline(value.to_owned()))
}
