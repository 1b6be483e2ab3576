//! Hold expiry sweep
//!
//! Pending bookings hold their calendar slot while payment is in flight.
//! This background task cancels holds whose payment never arrived so the
//! dates go back on the market.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::booking::BookingService;
use crate::domain::{DomainResult, RepositoryProvider};
use crate::shared::ShutdownSignal;

/// Configuration for the hold expiry sweep.
#[derive(Debug, Clone)]
pub struct HoldExpiryConfig {
    /// How often to sweep (in seconds)
    pub check_interval_secs: u64,
    /// How long a pending booking may wait for payment (in minutes)
    pub pending_ttl_minutes: i64,
}

impl Default for HoldExpiryConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 60,
            pending_ttl_minutes: 30,
        }
    }
}

pub struct HoldExpirySweeper {
    repos: Arc<dyn RepositoryProvider>,
    bookings: Arc<BookingService>,
    config: HoldExpiryConfig,
}

impl HoldExpirySweeper {
    pub fn new(repos: Arc<dyn RepositoryProvider>, bookings: Arc<BookingService>) -> Self {
        Self {
            repos,
            bookings,
            config: HoldExpiryConfig::default(),
        }
    }

    pub fn with_config(mut self, config: HoldExpiryConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the background sweep task.
    pub fn start(&self, shutdown: ShutdownSignal) {
        let repos = self.repos.clone();
        let bookings = self.bookings.clone();
        let config = self.config.clone();

        tokio::spawn(async move {
            info!(
                check_interval_secs = config.check_interval_secs,
                pending_ttl_minutes = config.pending_ttl_minutes,
                "Hold expiry sweep started"
            );

            let mut interval =
                tokio::time::interval(Duration::from_secs(config.check_interval_secs));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = sweep_once(&repos, &bookings, &config).await {
                            warn!(error = %e, "Hold expiry sweep failed");
                        }
                    }
                    _ = shutdown.notified().wait() => {
                        info!("Hold expiry sweep shutting down");
                        break;
                    }
                }
            }
        });
    }

    /// Run a single sweep immediately. The background loop calls this on
    /// every tick.
    pub async fn sweep(&self) -> DomainResult<usize> {
        sweep_once(&self.repos, &self.bookings, &self.config).await
    }
}

/// Cancel pending bookings older than the TTL. Returns how many expired.
async fn sweep_once(
    repos: &Arc<dyn RepositoryProvider>,
    bookings: &Arc<BookingService>,
    config: &HoldExpiryConfig,
) -> DomainResult<usize> {
    let cutoff = Utc::now() - chrono::Duration::minutes(config.pending_ttl_minutes);
    let stale = repos.bookings().find_stale_pending(cutoff).await?;

    if stale.is_empty() {
        debug!("No stale holds");
        return Ok(0);
    }

    let mut expired = 0;
    for booking in stale {
        // The payment may settle between the read and the cancel; the
        // guarded update makes the race lose cleanly.
        match bookings.cancel(booking.id).await {
            Ok(_) => {
                info!(
                    booking_id = %booking.id,
                    created_at = %booking.created_at,
                    "Expired unpaid hold"
                );
                expired += 1;
            }
            Err(e) => {
                warn!(booking_id = %booking.id, error = %e, "Could not expire hold");
            }
        }
    }

    Ok(expired)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::domain::{Booking, BookingStatus, Interval, Property};
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn interval(start_day: u32, end_day: u32) -> Interval {
        Interval::new(
            NaiveDate::from_ymd_opt(2030, 8, start_day).unwrap(),
            NaiveDate::from_ymd_opt(2030, 8, end_day).unwrap(),
        )
        .unwrap()
    }

    async fn fixture() -> (HoldExpirySweeper, Arc<dyn RepositoryProvider>, Uuid) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let bookings = Arc::new(BookingService::new(repos.clone()));
        let property = Property::new("Forest Hut", Decimal::new(10000, 2), 2);
        let property_id = property.id;
        repos.properties().insert(property).await.unwrap();
        (
            HoldExpirySweeper::new(repos.clone(), bookings),
            repos,
            property_id,
        )
    }

    async fn insert_booking_aged(
        repos: &Arc<dyn RepositoryProvider>,
        property_id: Uuid,
        iv: Interval,
        age_minutes: i64,
    ) -> Booking {
        let mut booking = Booking::new(property_id, Uuid::new_v4(), iv, 2, Decimal::new(66000, 2));
        booking.created_at = Utc::now() - chrono::Duration::minutes(age_minutes);
        repos.bookings().insert_if_available(booking).await.unwrap()
    }

    #[tokio::test]
    async fn sweep_cancels_only_stale_pending() {
        let (sweeper, repos, property_id) = fixture().await;
        let stale = insert_booking_aged(&repos, property_id, interval(1, 4), 45).await;
        let fresh = insert_booking_aged(&repos, property_id, interval(10, 12), 5).await;

        let expired = sweeper.sweep().await.unwrap();
        assert_eq!(expired, 1);

        let stale = repos.bookings().find_by_id(stale.id).await.unwrap().unwrap();
        let fresh = repos.bookings().find_by_id(fresh.id).await.unwrap().unwrap();
        assert_eq!(stale.status, BookingStatus::Cancelled);
        assert_eq!(fresh.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn confirmed_bookings_are_never_expired() {
        let (sweeper, repos, property_id) = fixture().await;
        let booking = insert_booking_aged(&repos, property_id, interval(1, 4), 45).await;
        repos
            .bookings()
            .update_status(booking.id, BookingStatus::Pending, BookingStatus::Confirmed)
            .await
            .unwrap();

        let expired = sweeper.sweep().await.unwrap();
        assert_eq!(expired, 0);
        assert_eq!(
            repos
                .bookings()
                .find_by_id(booking.id)
                .await
                .unwrap()
                .unwrap()
                .status,
            BookingStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn expired_hold_frees_the_dates() {
        let (sweeper, repos, property_id) = fixture().await;
        insert_booking_aged(&repos, property_id, interval(1, 4), 45).await;
        sweeper.sweep().await.unwrap();

        let bookings = BookingService::new(repos.clone());
        bookings
            .create(property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_calendar_sweeps_clean() {
        let (sweeper, _repos, _property_id) = fixture().await;
        assert_eq!(sweeper.sweep().await.unwrap(), 0);
    }
}
