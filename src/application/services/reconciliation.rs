//! Payment gateway reconciliation
//!
//! Applies webhook notifications to bookings: verify authenticity,
//! short-circuit duplicates, map the gateway status to a lifecycle move,
//! then apply it through the booking service. Nothing mutates before
//! step four.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::booking::BookingService;
use crate::domain::{
    DomainError, DomainResult, GatewayAction, PaymentEvent, PaymentNotification,
    RepositoryProvider,
};
use crate::infrastructure::crypto::verify_notification;

/// What a notification did to the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    /// Booking transitioned and the event was recorded
    Applied,
    /// Same transaction seen before; nothing changed
    AlreadyProcessed,
    /// Authentic but actionless (pending or unrecognized status)
    Ignored,
}

pub struct PaymentReconciliationService {
    repos: Arc<dyn RepositoryProvider>,
    bookings: Arc<BookingService>,
    server_key: String,
}

impl PaymentReconciliationService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        bookings: Arc<BookingService>,
        server_key: impl Into<String>,
    ) -> Self {
        Self {
            repos,
            bookings,
            server_key: server_key.into(),
        }
    }

    /// Process one gateway notification.
    ///
    /// Safe to call repeatedly with the same payload: the recorded
    /// transaction ID makes redelivery a no-op. Transient store errors
    /// propagate; the caller owns the retry policy.
    pub async fn handle_notification(
        &self,
        notification: &PaymentNotification,
    ) -> DomainResult<ReconciliationOutcome> {
        verify_notification(notification, &self.server_key)?;

        let booking_id = Uuid::parse_str(&notification.order_id).map_err(|_| {
            DomainError::Validation(format!(
                "order_id is not a booking id: {}",
                notification.order_id
            ))
        })?;

        if self
            .repos
            .payment_events()
            .find_by_transaction_id(&notification.transaction_id)
            .await?
            .is_some()
        {
            info!(
                transaction_id = %notification.transaction_id,
                %booking_id,
                "Notification already applied, skipping"
            );
            return Ok(ReconciliationOutcome::AlreadyProcessed);
        }

        let action = match GatewayAction::from_transaction_status(&notification.transaction_status)
        {
            Some(action) => action,
            None => {
                warn!(
                    transaction_id = %notification.transaction_id,
                    status = %notification.transaction_status,
                    "Unrecognized gateway status, ignoring"
                );
                return Ok(ReconciliationOutcome::Ignored);
            }
        };

        match action {
            GatewayAction::Confirm => {
                let amount = Decimal::from_str(&notification.gross_amount).map_err(|_| {
                    DomainError::Validation(format!(
                        "gross_amount is not a decimal: {}",
                        notification.gross_amount
                    ))
                })?;
                self.bookings.confirm(booking_id, amount).await?;
            }
            GatewayAction::Cancel => {
                self.bookings.cancel(booking_id).await?;
            }
            GatewayAction::Ignore => {
                // Gateway still settling; the same transaction_id will
                // come back with a final status, so record nothing.
                return Ok(ReconciliationOutcome::Ignored);
            }
        }

        let event = PaymentEvent::new(
            notification.transaction_id.clone(),
            booking_id,
            notification.transaction_status.clone(),
        );
        if !self.repos.payment_events().record(event).await? {
            // A concurrent delivery applied it between our check and now
            return Ok(ReconciliationOutcome::AlreadyProcessed);
        }

        info!(
            transaction_id = %notification.transaction_id,
            %booking_id,
            status = %notification.transaction_status,
            "Notification applied"
        );
        Ok(ReconciliationOutcome::Applied)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{Booking, BookingStatus, Interval, Property};
    use crate::infrastructure::crypto::compute_signature;
    use crate::infrastructure::InMemoryRepositoryProvider;

    const SERVER_KEY: &str = "test-server-key";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn signed(booking_id: Uuid, transaction_id: &str, status: &str, amount: &str) -> PaymentNotification {
        let order_id = booking_id.to_string();
        let signature_key = compute_signature(&order_id, "200", amount, SERVER_KEY);
        PaymentNotification {
            order_id,
            transaction_id: transaction_id.to_string(),
            transaction_status: status.to_string(),
            status_code: "200".to_string(),
            gross_amount: amount.to_string(),
            signature_key,
        }
    }

    struct Fixture {
        service: PaymentReconciliationService,
        bookings: Arc<BookingService>,
        booking_id: Uuid,
    }

    /// One pending booking at 660.00
    async fn fixture() -> Fixture {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let bookings = Arc::new(BookingService::new(repos.clone()));

        let property = Property::new("Pier Cottage", dec("200"), 4);
        let property_id = property.id;
        repos.properties().insert(property).await.unwrap();

        let interval = Interval::new(
            NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2030, 6, 4).unwrap(),
        )
        .unwrap();
        let booking = repos
            .bookings()
            .insert_if_available(Booking::new(
                property_id,
                Uuid::new_v4(),
                interval,
                2,
                dec("660.00"),
            ))
            .await
            .unwrap();

        Fixture {
            service: PaymentReconciliationService::new(repos, bookings.clone(), SERVER_KEY),
            bookings,
            booking_id: booking.id,
        }
    }

    #[tokio::test]
    async fn settlement_confirms_the_booking() {
        let f = fixture().await;
        let n = signed(f.booking_id, "tx-1", "settlement", "660.00");

        let outcome = f.service.handle_notification(&n).await.unwrap();
        assert_eq!(outcome, ReconciliationOutcome::Applied);
        assert_eq!(
            f.bookings.get(f.booking_id).await.unwrap().status,
            BookingStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn redelivery_is_idempotent() {
        let f = fixture().await;
        let n = signed(f.booking_id, "tx-1", "settlement", "660.00");

        assert_eq!(
            f.service.handle_notification(&n).await.unwrap(),
            ReconciliationOutcome::Applied
        );
        assert_eq!(
            f.service.handle_notification(&n).await.unwrap(),
            ReconciliationOutcome::AlreadyProcessed
        );
        assert_eq!(
            f.bookings.get(f.booking_id).await.unwrap().status,
            BookingStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn bad_signature_changes_nothing() {
        let f = fixture().await;
        let mut n = signed(f.booking_id, "tx-1", "settlement", "660.00");
        n.signature_key = "deadbeef".to_string();

        let err = f.service.handle_notification(&n).await.unwrap_err();
        assert!(matches!(err, DomainError::Signature(_)));
        assert_eq!(
            f.bookings.get(f.booking_id).await.unwrap().status,
            BookingStatus::Pending
        );
    }

    #[tokio::test]
    async fn tampered_amount_is_rejected() {
        let f = fixture().await;
        // Signature is valid for the wrong amount; the quote check catches it
        let n = signed(f.booking_id, "tx-1", "settlement", "1.00");

        let err = f.service.handle_notification(&n).await.unwrap_err();
        assert!(matches!(err, DomainError::AmountMismatch { .. }));
        assert_eq!(
            f.bookings.get(f.booking_id).await.unwrap().status,
            BookingStatus::Pending
        );
    }

    #[tokio::test]
    async fn expire_cancels_the_hold() {
        let f = fixture().await;
        let n = signed(f.booking_id, "tx-1", "expire", "660.00");

        let outcome = f.service.handle_notification(&n).await.unwrap();
        assert_eq!(outcome, ReconciliationOutcome::Applied);
        assert_eq!(
            f.bookings.get(f.booking_id).await.unwrap().status,
            BookingStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn pending_is_ignored_and_not_recorded() {
        let f = fixture().await;
        let pending = signed(f.booking_id, "tx-1", "pending", "660.00");
        assert_eq!(
            f.service.handle_notification(&pending).await.unwrap(),
            ReconciliationOutcome::Ignored
        );

        // The final settlement reuses the transaction id and still applies
        let settlement = signed(f.booking_id, "tx-1", "settlement", "660.00");
        assert_eq!(
            f.service.handle_notification(&settlement).await.unwrap(),
            ReconciliationOutcome::Applied
        );
    }

    #[tokio::test]
    async fn unknown_status_is_ignored() {
        let f = fixture().await;
        let n = signed(f.booking_id, "tx-1", "refund", "660.00");

        assert_eq!(
            f.service.handle_notification(&n).await.unwrap(),
            ReconciliationOutcome::Ignored
        );
        assert_eq!(
            f.bookings.get(f.booking_id).await.unwrap().status,
            BookingStatus::Pending
        );
    }

    #[tokio::test]
    async fn unparseable_order_id_is_a_validation_error() {
        let f = fixture().await;
        let signature_key = compute_signature("not-a-uuid", "200", "660.00", SERVER_KEY);
        let n = PaymentNotification {
            order_id: "not-a-uuid".to_string(),
            transaction_id: "tx-1".to_string(),
            transaction_status: "settlement".to_string(),
            status_code: "200".to_string(),
            gross_amount: "660.00".to_string(),
            signature_key,
        };

        let err = f.service.handle_notification(&n).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let f = fixture().await;
        let n = signed(Uuid::new_v4(), "tx-1", "settlement", "660.00");

        let err = f.service.handle_notification(&n).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
