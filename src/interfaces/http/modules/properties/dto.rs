//! Property DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Property;

/// Request to create a property listing
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Price per night; must be positive
    pub nightly_rate: Decimal,
    #[validate(range(min = 1, max = 32))]
    pub max_guests: u32,
}

/// Request for a price preview over a date range
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    /// Check-in date (inclusive)
    pub start_date: NaiveDate,
    /// Check-out date (exclusive)
    pub end_date: NaiveDate,
}

/// Property details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyDto {
    pub id: Uuid,
    pub name: String,
    pub nightly_rate: Decimal,
    pub max_guests: u32,
    pub created_at: String,
}

impl From<Property> for PropertyDto {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            name: p.name,
            nightly_rate: p.nightly_rate,
            max_guests: p.max_guests,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}
