//! Cart item domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::interval::Interval;

/// A pre-booking hold: intent, not a guarantee.
///
/// Does not block other users' reservations until checkout converts it
/// into a pending booking. Deleted on removal, checkout, or cart clear.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub property_id: Uuid,
    pub interval: Interval,
    pub guest_count: u32,
    /// Total quoted when the item entered the cart; compared against a
    /// fresh quote at checkout to detect rate drift.
    pub quoted_total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(
        user_id: Uuid,
        property_id: Uuid,
        interval: Interval,
        guest_count: u32,
        quoted_total: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            property_id,
            interval,
            guest_count,
            quoted_total,
            created_at: Utc::now(),
        }
    }
}
