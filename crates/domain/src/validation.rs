//! Booking date validation.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::clock::Clock;

/// The date rule a requested range violated.
///
/// Rules are checked in declaration order and the first failure wins, so
/// the same input always reports the same rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("from cannot be empty")]
    MissingFrom,

    #[error("to cannot be empty")]
    MissingTo,

    #[error("from cannot be after to")]
    FromAfterTo,

    #[error("from must be a date without time")]
    FromNotDate,

    #[error("to must be a date without time")]
    ToNotDate,

    #[error("from cannot be in the past")]
    FromInPast,

    /// Never reported: implied by `from <= to` and the `from` check.
    #[error("to cannot be in the past")]
    ToInPast,
}

/// Checks that `[from, to)` is a well-formed whole-day range that does not
/// start or end before `clock.now()`.
pub fn validate_date_range(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    clock: &dyn Clock,
) -> Result<(), DateRangeError> {
    DateRange::from_parts(from, to, clock).map(|_| ())
}

/// Midnight in the value's own offset.
fn is_date<Tz: TimeZone>(t: &DateTime<Tz>) -> bool {
    t.hour() == 0 && t.minute() == 0 && t.second() == 0 && t.nanosecond() == 0
}

/// The calendar day `t` names in its own offset, as a UTC midnight.
fn utc_day<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Utc> {
    t.naive_local().and_utc()
}

/// A validated, half-open `[from, to)` range of whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl DateRange {
    /// Validates and builds a range.
    pub fn new<Tz: TimeZone>(
        from: DateTime<Tz>,
        to: DateTime<Tz>,
        clock: &dyn Clock,
    ) -> Result<Self, DateRangeError> {
        Self::from_parts(Some(from), Some(to), clock)
    }

    /// Validates and builds a range from possibly missing bounds.
    ///
    /// Bounds may carry any offset. Each must be a midnight in its own
    /// offset and is stored as the UTC midnight of that calendar day, so
    /// `2030-06-01T00:00:00+03:00` and `2030-06-01T00:00:00Z` name the same
    /// day.
    pub fn from_parts<Tz: TimeZone>(
        from: Option<DateTime<Tz>>,
        to: Option<DateTime<Tz>>,
        clock: &dyn Clock,
    ) -> Result<Self, DateRangeError> {
        let from = from.ok_or(DateRangeError::MissingFrom)?;
        let to = to.ok_or(DateRangeError::MissingTo)?;

        if from > to || from.naive_local() > to.naive_local() {
            return Err(DateRangeError::FromAfterTo);
        }
        if !is_date(&from) {
            return Err(DateRangeError::FromNotDate);
        }
        if !is_date(&to) {
            return Err(DateRangeError::ToNotDate);
        }

        let (from, to) = (utc_day(&from), utc_day(&to));
        let now = clock.now();
        if from < now {
            return Err(DateRangeError::FromInPast);
        }
        if to < now {
            return Err(DateRangeError::ToInPast);
        }

        Ok(Self { from, to })
    }

    /// First day of the range (inclusive).
    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// End of the range (exclusive).
    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Returns true if the two half-open ranges intersect.
    ///
    /// A range ending on day X and one starting on day X do not overlap. An
    /// empty range `[X, X)` still overlaps any range that spans X.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.from < other.to && other.from < self.to
    }
}
