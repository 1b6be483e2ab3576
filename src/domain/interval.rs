//! Half-open date interval `[start, end)`
//!
//! The calendar unit of the whole engine. A checkout day equal to another
//! booking's check-in day is not a conflict.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::{DomainError, DomainResult};

/// Immutable half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Interval {
    /// Check-in day (inclusive)
    pub start: NaiveDate,
    /// Check-out day (exclusive)
    pub end: NaiveDate,
}

impl Interval {
    /// Build an interval, rejecting `end <= start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if end <= start {
            return Err(DomainError::InvalidRange(format!(
                "end ({end}) must be after start ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Build an interval from absolute timestamps interpreted as whole-day
    /// checkpoints. The start truncates to its calendar day; a fractional
    /// end rounds up to the next day, so a partial day counts as a full
    /// night.
    pub fn from_timestamps(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        let start_day = start.date_naive();
        let end_day = if end.num_seconds_from_midnight() > 0 {
            end.date_naive().succ_opt().ok_or_else(|| {
                DomainError::InvalidRange("end date out of calendar range".into())
            })?
        } else {
            end.date_naive()
        };
        Self::new(start_day, end_day)
    }

    /// Half-open overlap predicate. Touching intervals do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Number of nights covered by this interval.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

// ── Tests ──────────────────────────────────────────────────────
