//! Cart management and checkout
//!
//! Cart items are intent, not holds: nothing is checked against the
//! calendar until checkout, where each item independently goes through
//! re-quote and the atomic conditional insert.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::booking::BookingService;
use super::store_call;
use crate::domain::{
    quote, Booking, CartItem, DomainError, DomainResult, Interval, RepositoryProvider,
};

/// Fields a cart item update may change.
#[derive(Debug, Clone, Default)]
pub struct CartItemPatch {
    pub interval: Option<Interval>,
    pub guest_count: Option<u32>,
}

/// One item that could not be booked at checkout. The cart row is kept
/// so the user can retry or remove it.
#[derive(Debug, Clone)]
pub struct CheckoutFailure {
    pub cart_item_id: Uuid,
    pub error: DomainError,
}

/// Per-item checkout result; partial failure by design.
#[derive(Debug, Clone, Default)]
pub struct CheckoutOutcome {
    pub booked: Vec<Booking>,
    pub failed: Vec<CheckoutFailure>,
}

pub struct CartService {
    repos: Arc<dyn RepositoryProvider>,
    bookings: Arc<BookingService>,
    store_timeout: Duration,
}

impl CartService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, bookings: Arc<BookingService>) -> Self {
        Self {
            repos,
            bookings,
            store_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Add an item to the user's cart. No availability check here; the
    /// calendar is only consulted at checkout.
    pub async fn add(
        &self,
        user_id: Uuid,
        property_id: Uuid,
        interval: Interval,
        guest_count: u32,
    ) -> DomainResult<CartItem> {
        let property = self
            .repos
            .properties()
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", property_id))?;

        validate_stay(&interval, guest_count, property.max_guests)?;

        let price = quote(property.nightly_rate, &interval)?;
        let item = CartItem::new(user_id, property_id, interval, guest_count, price.total);
        self.repos.cart_items().insert(item.clone()).await?;

        info!(
            cart_item_id = %item.id,
            %user_id,
            %property_id,
            quoted_total = %item.quoted_total,
            "Cart item added"
        );
        Ok(item)
    }

    pub async fn list(&self, user_id: Uuid) -> DomainResult<Vec<CartItem>> {
        self.repos.cart_items().find_for_user(user_id).await
    }

    /// Update dates or guest count on an owned cart item. Date changes
    /// re-quote against the current nightly rate.
    pub async fn update(
        &self,
        user_id: Uuid,
        cart_item_id: Uuid,
        patch: CartItemPatch,
    ) -> DomainResult<CartItem> {
        let mut item = self.find_owned(user_id, cart_item_id).await?;

        let property = self
            .repos
            .properties()
            .find_by_id(item.property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", item.property_id))?;

        if let Some(guest_count) = patch.guest_count {
            item.guest_count = guest_count;
        }
        if let Some(interval) = patch.interval {
            item.interval = interval;
            item.quoted_total = quote(property.nightly_rate, &interval)?.total;
        }

        validate_stay(&item.interval, item.guest_count, property.max_guests)?;

        self.repos.cart_items().update(item.clone()).await?;
        Ok(item)
    }

    pub async fn remove(&self, user_id: Uuid, cart_item_id: Uuid) -> DomainResult<()> {
        self.find_owned(user_id, cart_item_id).await?;
        self.repos.cart_items().delete(cart_item_id).await
    }

    pub async fn clear(&self, user_id: Uuid) -> DomainResult<()> {
        self.repos.cart_items().clear_for_user(user_id).await
    }

    /// Convert cart items into pending bookings, item by item.
    ///
    /// An empty `cart_item_ids` means the whole cart. Each item is
    /// re-quoted (rate drift fails the item and refreshes its stored
    /// quote) and then raced through the conditional insert. Items that
    /// fail stay in the cart; items that book are removed from it.
    pub async fn checkout(
        &self,
        user_id: Uuid,
        cart_item_ids: &[Uuid],
    ) -> DomainResult<CheckoutOutcome> {
        let items = if cart_item_ids.is_empty() {
            self.repos.cart_items().find_for_user(user_id).await?
        } else {
            let mut items = Vec::with_capacity(cart_item_ids.len());
            for &id in cart_item_ids {
                items.push(self.find_owned(user_id, id).await?);
            }
            items
        };

        let mut outcome = CheckoutOutcome::default();

        for item in items {
            match self.checkout_item(user_id, &item).await {
                Ok(booking) => {
                    if let Err(e) = self.repos.cart_items().delete(item.id).await {
                        // The booking exists either way; a stale cart row
                        // is recoverable, a lost booking is not.
                        warn!(cart_item_id = %item.id, error = %e, "Failed to remove booked cart item");
                    }
                    outcome.booked.push(booking);
                }
                Err(error) => {
                    warn!(cart_item_id = %item.id, error = %error, "Checkout item failed");
                    outcome.failed.push(CheckoutFailure {
                        cart_item_id: item.id,
                        error,
                    });
                }
            }
        }

        info!(
            %user_id,
            booked = outcome.booked.len(),
            failed = outcome.failed.len(),
            "Checkout finished"
        );
        Ok(outcome)
    }

    async fn checkout_item(&self, user_id: Uuid, item: &CartItem) -> DomainResult<Booking> {
        let property = store_call(
            self.store_timeout,
            self.repos.properties().find_by_id(item.property_id),
        )
        .await?
        .ok_or_else(|| DomainError::not_found("Property", item.property_id))?;

        let fresh = quote(property.nightly_rate, &item.interval)?;
        if fresh.total != item.quoted_total {
            // Refresh the stored quote so a retry books at the new price
            let mut updated = item.clone();
            updated.quoted_total = fresh.total;
            self.repos.cart_items().update(updated).await?;

            return Err(DomainError::Validation(format!(
                "price changed since the item was added: quoted {}, now {}",
                item.quoted_total, fresh.total
            )));
        }

        store_call(
            self.store_timeout,
            self.bookings
                .create(item.property_id, user_id, item.interval, item.guest_count),
        )
        .await
    }

    async fn find_owned(&self, user_id: Uuid, cart_item_id: Uuid) -> DomainResult<CartItem> {
        // Foreign items are indistinguishable from missing ones
        self.repos
            .cart_items()
            .find_by_id(cart_item_id)
            .await?
            .filter(|item| item.user_id == user_id)
            .ok_or_else(|| DomainError::not_found("CartItem", cart_item_id))
    }
}

fn validate_stay(interval: &Interval, guest_count: u32, max_guests: u32) -> DomainResult<()> {
    if interval.start < Utc::now().date_naive() {
        return Err(DomainError::Validation(format!(
            "check-in date {} is in the past",
            interval.start
        )));
    }
    if guest_count == 0 || guest_count > max_guests {
        return Err(DomainError::Validation(format!(
            "guest_count must be between 1 and {max_guests}, got {guest_count}"
        )));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    use crate::domain::{BookingStatus, Property};
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // Far-future dates keep the check-in validation out of the way
    fn interval(start_day: u32, end_day: u32) -> Interval {
        Interval::new(
            NaiveDate::from_ymd_opt(2030, 5, start_day).unwrap(),
            NaiveDate::from_ymd_opt(2030, 5, end_day).unwrap(),
        )
        .unwrap()
    }

    struct Fixture {
        repos: Arc<dyn RepositoryProvider>,
        cart: CartService,
        property_id: Uuid,
        user_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let bookings = Arc::new(BookingService::new(repos.clone()));
        let cart = CartService::new(repos.clone(), bookings);

        // 200/night: 3 nights -> 660.00 with the service fee
        let property = Property::new("Canal House", dec("200"), 4);
        let property_id = property.id;
        repos.properties().insert(property).await.unwrap();

        Fixture {
            repos,
            cart,
            property_id,
            user_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn add_stores_cart_time_quote() {
        let f = fixture().await;
        let item = f
            .cart
            .add(f.user_id, f.property_id, interval(1, 4), 2)
            .await
            .unwrap();
        assert_eq!(item.quoted_total, dec("660.00"));
        assert_eq!(f.cart.list(f.user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_rejects_past_check_in() {
        let f = fixture().await;
        let past = Interval::new(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 3).unwrap(),
        )
        .unwrap();
        let err = f
            .cart
            .add(f.user_id, f.property_id, past, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn add_does_not_block_other_users() {
        let f = fixture().await;
        f.cart
            .add(f.user_id, f.property_id, interval(1, 4), 2)
            .await
            .unwrap();

        // Another user can book the same dates directly
        let bookings = BookingService::new(f.repos.clone());
        bookings
            .create(f.property_id, Uuid::new_v4(), interval(1, 4), 2)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_with_new_dates_requotes() {
        let f = fixture().await;
        let item = f
            .cart
            .add(f.user_id, f.property_id, interval(1, 4), 2)
            .await
            .unwrap();

        let updated = f
            .cart
            .update(
                f.user_id,
                item.id,
                CartItemPatch {
                    interval: Some(interval(1, 2)),
                    guest_count: None,
                },
            )
            .await
            .unwrap();
        // 1 night at 200 -> 220.00
        assert_eq!(updated.quoted_total, dec("220.00"));
    }

    #[tokio::test]
    async fn foreign_cart_item_reads_as_missing() {
        let f = fixture().await;
        let item = f
            .cart
            .add(f.user_id, f.property_id, interval(1, 4), 2)
            .await
            .unwrap();

        let err = f.cart.remove(Uuid::new_v4(), item.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn checkout_books_and_empties_cart() {
        let f = fixture().await;
        f.cart
            .add(f.user_id, f.property_id, interval(1, 4), 2)
            .await
            .unwrap();

        let outcome = f.cart.checkout(f.user_id, &[]).await.unwrap();
        assert_eq!(outcome.booked.len(), 1);
        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.booked[0].status, BookingStatus::Pending);
        assert!(f.cart.list(f.user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn checkout_is_partial_on_conflict() {
        let f = fixture().await;
        let losing = f
            .cart
            .add(f.user_id, f.property_id, interval(1, 4), 2)
            .await
            .unwrap();
        f.cart
            .add(f.user_id, f.property_id, interval(10, 12), 2)
            .await
            .unwrap();

        // Someone else takes the first item's dates before checkout
        let bookings = BookingService::new(f.repos.clone());
        bookings
            .create(f.property_id, Uuid::new_v4(), interval(2, 5), 2)
            .await
            .unwrap();

        let outcome = f.cart.checkout(f.user_id, &[]).await.unwrap();
        assert_eq!(outcome.booked.len(), 1);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].cart_item_id, losing.id);
        assert!(matches!(
            outcome.failed[0].error,
            DomainError::Conflict { .. }
        ));

        // The failed item stays in the cart for a retry
        let remaining = f.cart.list(f.user_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, losing.id);
    }

    #[tokio::test]
    async fn checkout_detects_rate_drift() {
        let f = fixture().await;
        let item = f
            .cart
            .add(f.user_id, f.property_id, interval(1, 4), 2)
            .await
            .unwrap();

        // Host raises the rate after the item entered the cart
        let mut property = f
            .repos
            .properties()
            .find_by_id(f.property_id)
            .await
            .unwrap()
            .unwrap();
        property.nightly_rate = dec("250");
        f.repos.properties().insert(property).await.unwrap();

        let outcome = f.cart.checkout(f.user_id, &[item.id]).await.unwrap();
        assert!(outcome.booked.is_empty());
        assert_eq!(outcome.failed.len(), 1);
        assert!(matches!(
            outcome.failed[0].error,
            DomainError::Validation(_)
        ));

        // Stored quote refreshed; a second checkout books at the new price
        let outcome = f.cart.checkout(f.user_id, &[item.id]).await.unwrap();
        assert_eq!(outcome.booked.len(), 1);
        // 3 nights at 250 -> 750 + 75 = 825.00
        assert_eq!(outcome.booked[0].total_price, dec("825.00"));
    }

    #[tokio::test]
    async fn checkout_of_selected_items_only() {
        let f = fixture().await;
        let first = f
            .cart
            .add(f.user_id, f.property_id, interval(1, 4), 2)
            .await
            .unwrap();
        let second = f
            .cart
            .add(f.user_id, f.property_id, interval(10, 12), 2)
            .await
            .unwrap();

        let outcome = f.cart.checkout(f.user_id, &[first.id]).await.unwrap();
        assert_eq!(outcome.booked.len(), 1);

        let remaining = f.cart.list(f.user_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
    }

    #[tokio::test]
    async fn clear_removes_only_that_users_items() {
        let f = fixture().await;
        let other_user = Uuid::new_v4();
        f.cart
            .add(f.user_id, f.property_id, interval(1, 4), 2)
            .await
            .unwrap();
        f.cart
            .add(other_user, f.property_id, interval(10, 12), 2)
            .await
            .unwrap();

        f.cart.clear(f.user_id).await.unwrap();
        assert!(f.cart.list(f.user_id).await.unwrap().is_empty());
        assert_eq!(f.cart.list(other_user).await.unwrap().len(), 1);
    }
}
