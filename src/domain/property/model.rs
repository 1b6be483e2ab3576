//! Property domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A bookable property listing.
///
/// The engine only needs the nightly rate and the guest cap; everything
/// else about a listing (photos, description, location) lives outside
/// this core.
#[derive(Debug, Clone)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub nightly_rate: Decimal,
    pub max_guests: u32,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn new(name: impl Into<String>, nightly_rate: Decimal, max_guests: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            nightly_rate,
            max_guests,
            created_at: Utc::now(),
        }
    }
}
