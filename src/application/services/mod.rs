//! Application services

mod availability;
mod booking;
mod cart;
mod hold_expiry;
mod reconciliation;

pub use availability::{Availability, AvailabilityService};
pub use booking::BookingService;
pub use cart::{CartItemPatch, CartService, CheckoutFailure, CheckoutOutcome};
pub use hold_expiry::{HoldExpiryConfig, HoldExpirySweeper};
pub use reconciliation::{PaymentReconciliationService, ReconciliationOutcome};

use std::future::Future;
use std::time::Duration;

use crate::domain::{DomainError, DomainResult};

/// Bound a storage-backed call. A hung store must not hang the request;
/// the timeout maps to `TransientStore` and leaves no partial state.
pub(crate) async fn store_call<T>(
    timeout: Duration,
    fut: impl Future<Output = DomainResult<T>>,
) -> DomainResult<T> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::TransientStore(format!(
            "storage call timed out after {}s",
            timeout.as_secs()
        ))),
    }
}
