//! Booking DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Booking;

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: Uuid,
    /// Check-in date (inclusive)
    pub start_date: NaiveDate,
    /// Check-out date (exclusive)
    pub end_date: NaiveDate,
    pub guest_count: u32,
    pub total_price: Decimal,
    /// pending | confirmed | cancelled | completed
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            property_id: b.property_id,
            user_id: b.user_id,
            start_date: b.interval.start,
            end_date: b.interval.end,
            guest_count: b.guest_count,
            total_price: b.total_price,
            status: b.status.as_str().to_string(),
            created_at: b.created_at.to_rfc3339(),
            updated_at: b.updated_at.to_rfc3339(),
        }
    }
}
