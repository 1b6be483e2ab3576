//! Availability DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Interval;

/// Request to check whether a date range is free
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AvailabilityRequest {
    /// Property to check
    pub property_id: Uuid,
    /// Check-in date (ISO 8601, inclusive)
    pub start_date: NaiveDate,
    /// Check-out date (ISO 8601, exclusive)
    pub end_date: NaiveDate,
}

/// A half-open date range `[start, end)`
#[derive(Debug, Serialize, ToSchema)]
pub struct DateRangeDto {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<Interval> for DateRangeDto {
    fn from(interval: Interval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
        }
    }
}

/// Availability check result
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub available: bool,
    /// Active booking ranges overlapping the request
    pub conflicting_dates: Vec<DateRangeDto>,
}
