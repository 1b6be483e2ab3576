//! Booking repository interface
//!
//! The booking calendar is the only shared mutable resource in the
//! system. It is written exclusively through `insert_if_available` and
//! `update_status`; everything else is read-only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::{Booking, BookingStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find booking by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;

    /// Active (pending or confirmed) bookings for a property, ordered by
    /// check-in date. The advisory read behind availability checks.
    async fn find_active_for_property(&self, property_id: Uuid) -> DomainResult<Vec<Booking>>;

    /// All bookings owned by a user, newest first
    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Booking>>;

    /// Atomic conditional insert: persist the booking only if no active
    /// booking overlaps its interval at write time. The check and the
    /// insert happen in one storage transaction; this is the authoritative
    /// no-double-booking point. Fails with `DomainError::Conflict`
    /// carrying the conflicting intervals.
    async fn insert_if_available(&self, booking: Booking) -> DomainResult<Booking>;

    /// Guarded status transition: update only if the row is still in
    /// `expected`. Fails with `InvalidTransition` when another writer got
    /// there first, `NotFound` when the booking does not exist.
    async fn update_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> DomainResult<()>;

    /// Pending bookings created before `cutoff`, for the hold expiry sweep
    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Booking>>;
}
