//! Booking lifecycle service
//!
//! The only component that moves a booking through its status machine.
//! Creation goes through the repository's atomic conditional insert;
//! every transition goes through the guarded `update_status`.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    quote, Booking, BookingStatus, DomainError, DomainResult, Interval, RepositoryProvider,
};

/// Paid amounts within one cent of the quoted total are accepted.
fn amount_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Create a booking in `Pending`, holding the calendar slot.
    ///
    /// The overlap check and the insert are one atomic storage operation;
    /// a lost race surfaces as `Conflict` with the winning intervals.
    pub async fn create(
        &self,
        property_id: Uuid,
        user_id: Uuid,
        interval: Interval,
        guest_count: u32,
    ) -> DomainResult<Booking> {
        let property = self
            .repos
            .properties()
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", property_id))?;

        if guest_count == 0 || guest_count > property.max_guests {
            return Err(DomainError::Validation(format!(
                "guest_count must be between 1 and {}, got {guest_count}",
                property.max_guests
            )));
        }

        let price = quote(property.nightly_rate, &interval)?;
        let booking = Booking::new(property_id, user_id, interval, guest_count, price.total);

        let booking = self.repos.bookings().insert_if_available(booking).await?;

        info!(
            booking_id = %booking.id,
            %property_id,
            %user_id,
            interval = %booking.interval,
            total = %booking.total_price,
            "Booking created"
        );

        Ok(booking)
    }

    /// Confirm a pending booking after payment settles.
    ///
    /// `paid_amount` must match the quoted total within one cent;
    /// anything else is `AmountMismatch` and the booking stays pending.
    pub async fn confirm(&self, booking_id: Uuid, paid_amount: Decimal) -> DomainResult<Booking> {
        let booking = self.find(booking_id).await?;
        booking.check_transition(BookingStatus::Confirmed)?;

        if (paid_amount - booking.total_price).abs() > amount_tolerance() {
            warn!(
                %booking_id,
                expected = %booking.total_price,
                actual = %paid_amount,
                "Payment amount mismatch"
            );
            return Err(DomainError::AmountMismatch {
                expected: booking.total_price,
                actual: paid_amount,
            });
        }

        self.repos
            .bookings()
            .update_status(booking_id, booking.status, BookingStatus::Confirmed)
            .await?;

        info!(%booking_id, "Booking confirmed");
        self.find(booking_id).await
    }

    /// Cancel a pending or confirmed booking, freeing the calendar slot.
    pub async fn cancel(&self, booking_id: Uuid) -> DomainResult<Booking> {
        let booking = self.find(booking_id).await?;
        booking.check_transition(BookingStatus::Cancelled)?;

        self.repos
            .bookings()
            .update_status(booking_id, booking.status, BookingStatus::Cancelled)
            .await?;

        info!(%booking_id, from = %booking.status, "Booking cancelled");
        self.find(booking_id).await
    }

    /// Mark a confirmed booking as completed after the stay ends.
    pub async fn complete(&self, booking_id: Uuid) -> DomainResult<Booking> {
        let booking = self.find(booking_id).await?;
        booking.check_transition(BookingStatus::Completed)?;

        self.repos
            .bookings()
            .update_status(booking_id, booking.status, BookingStatus::Completed)
            .await?;

        info!(%booking_id, "Booking completed");
        self.find(booking_id).await
    }

    pub async fn get(&self, booking_id: Uuid) -> DomainResult<Booking> {
        self.find(booking_id).await
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_for_user(user_id).await
    }

    async fn find(&self, booking_id: Uuid) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    use crate::domain::Property;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn interval(start_day: u32, end_day: u32) -> Interval {
        Interval::new(
            NaiveDate::from_ymd_opt(2024, 9, start_day).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, end_day).unwrap(),
        )
        .unwrap()
    }

    async fn service_with_property() -> (BookingService, Uuid) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        // 3 nights at 200.00 -> 600 + 60 fee = 660.00
        let property = Property::new("Hill Cabin", dec("200"), 4);
        let property_id = property.id;
        repos.properties().insert(property).await.unwrap();
        (BookingService::new(repos), property_id)
    }

    #[tokio::test]
    async fn create_quotes_and_holds_pending() {
        let (service, property_id) = service_with_property().await;
        let booking = service
            .create(property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, dec("660.00"));
    }

    #[tokio::test]
    async fn overlapping_create_conflicts() {
        let (service, property_id) = service_with_property().await;
        service
            .create(property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();

        let err = service
            .create(property_id, Uuid::new_v4(), interval(3, 6), 2)
            .await
            .unwrap_err();
        match err {
            DomainError::Conflict { conflicts } => assert_eq!(conflicts, vec![interval(1, 4)]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn concurrent_creates_yield_one_winner() {
        let (service, property_id) = service_with_property().await;
        let service = Arc::new(service);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .create(property_id, Uuid::new_v4(), interval(10, 14), 2)
                    .await
            }));
        }

        let mut winners = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(DomainError::Conflict { .. }) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(conflicts, 7);
    }

    #[tokio::test]
    async fn guest_count_over_capacity_rejected() {
        let (service, property_id) = service_with_property().await;
        let err = service
            .create(property_id, Uuid::new_v4(), interval(1, 4), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn confirm_with_exact_amount() {
        let (service, property_id) = service_with_property().await;
        let booking = service
            .create(property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();

        let confirmed = service.confirm(booking.id, dec("660.00")).await.unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn confirm_within_one_cent_tolerance() {
        let (service, property_id) = service_with_property().await;
        let booking = service
            .create(property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();

        let confirmed = service.confirm(booking.id, dec("660.01")).await.unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn confirm_with_tampered_amount_rejected() {
        let (service, property_id) = service_with_property().await;
        let booking = service
            .create(property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();

        let err = service.confirm(booking.id, dec("1.00")).await.unwrap_err();
        match err {
            DomainError::AmountMismatch { expected, actual } => {
                assert_eq!(expected, dec("660.00"));
                assert_eq!(actual, dec("1.00"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Booking stays pending after the rejected confirm
        assert_eq!(
            service.get(booking.id).await.unwrap().status,
            BookingStatus::Pending
        );
    }

    #[tokio::test]
    async fn cancel_frees_the_slot() {
        let (service, property_id) = service_with_property().await;
        let booking = service
            .create(property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();
        service.cancel(booking.id).await.unwrap();

        // Same dates bookable again
        service
            .create(property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn complete_requires_confirmed() {
        let (service, property_id) = service_with_property().await;
        let booking = service
            .create(property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();

        let err = service.complete(booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));

        service.confirm(booking.id, dec("660.00")).await.unwrap();
        let completed = service.complete(booking.id).await.unwrap();
        assert_eq!(completed.status, BookingStatus::Completed);
    }

    #[tokio::test]
    async fn cancelled_booking_rejects_confirm() {
        let (service, property_id) = service_with_property().await;
        let booking = service
            .create(property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();
        service.cancel(booking.id).await.unwrap();

        let err = service.confirm(booking.id, dec("660.00")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: BookingStatus::Cancelled,
                to: BookingStatus::Confirmed,
            }
        ));
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let (service, _property_id) = service_with_property().await;
        let err = service.cancel(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
