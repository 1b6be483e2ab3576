//! Cart DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::CartItem;
use crate::interfaces::http::modules::bookings::BookingDto;

/// Request to add a property stay to the cart
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddCartItemRequest {
    pub property_id: Uuid,
    /// Check-in date (inclusive)
    pub start_date: NaiveDate,
    /// Check-out date (exclusive)
    pub end_date: NaiveDate,
    #[validate(range(min = 1, max = 32))]
    pub guest_count: u32,
}

/// Request to change an existing cart item. Dates change together or
/// not at all.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCartItemRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 32))]
    pub guest_count: Option<u32>,
}

/// Request to convert cart items into bookings
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    /// Items to check out; empty means the whole cart
    #[serde(default)]
    pub cart_item_ids: Vec<Uuid>,
}

/// Cart item in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemDto {
    pub id: Uuid,
    pub property_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guest_count: u32,
    /// Total quoted when the item entered the cart
    pub quoted_total: Decimal,
    pub created_at: String,
}

impl From<CartItem> for CartItemDto {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            property_id: item.property_id,
            start_date: item.interval.start,
            end_date: item.interval.end,
            guest_count: item.guest_count,
            quoted_total: item.quoted_total,
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

/// One cart item that failed to book
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutFailureDto {
    pub cart_item_id: Uuid,
    pub error: String,
}

/// Per-item checkout outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    /// Pending bookings created by this checkout
    pub booked: Vec<BookingDto>,
    /// Items that stayed in the cart with the reason
    pub failed: Vec<CheckoutFailureDto>,
}
