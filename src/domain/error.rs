//! Domain error taxonomy

use rust_decimal::Decimal;
use thiserror::Error;

use super::booking::BookingStatus;
use super::interval::Interval;

/// Domain-level error types
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// Malformed date range (end <= start)
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// The requested date range overlaps one or more active bookings
    #[error("Date range is no longer available ({n} conflicting booking(s))", n = conflicts.len())]
    Conflict { conflicts: Vec<Interval> },

    /// Illegal booking lifecycle move
    #[error("Invalid booking transition: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Payment amount diverges from the quoted total beyond tolerance
    #[error("Payment amount mismatch: expected {expected}, got {actual}")]
    AmountMismatch { expected: Decimal, actual: Decimal },

    /// Webhook notification failed authenticity verification
    #[error("Signature verification failed: {0}")]
    Signature(String),

    /// Storage I/O failure, safe to retry with bounded attempts
    #[error("Transient storage error: {0}")]
    TransientStore(String),

    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation: {0}")]
    Validation(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::TransientStore(_))
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
