//! Booking domain entity and lifecycle states

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::interval::Interval;

/// Booking lifecycle status.
///
/// `Pending` and `Confirmed` both count against availability; an unpaid
/// but not-yet-expired hold still reserves the calendar slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Created at checkout, awaiting payment
    Pending,
    /// Payment settled
    Confirmed,
    /// Cancelled by user, payment failure or hold expiry (terminal)
    Cancelled,
    /// Stay finished (terminal)
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Whether this booking blocks the calendar slot.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// The lifecycle machine: pending -> confirmed | cancelled,
    /// confirmed -> cancelled | completed.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reservation for a property over a date range.
///
/// Never deleted, only transitioned through `BookingStatus`.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: Uuid,
    pub interval: Interval,
    pub guest_count: u32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        property_id: Uuid,
        user_id: Uuid,
        interval: Interval,
        guest_count: u32,
        total_price: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property_id,
            user_id,
            interval,
            guest_count,
            total_price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate a lifecycle move without applying it.
    pub fn check_transition(&self, next: BookingStatus) -> DomainResult<()> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.status,
                to: next,
            })
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

// ── Tests ──────────────────────────────────────────────────────
