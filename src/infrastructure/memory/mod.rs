//! In-memory repository implementations for development and testing
//!
//! The booking map sits behind one mutex so the overlap check and the
//! insert happen under a single lock, matching the transactional
//! guarantee of the database implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::cart::{CartItem, CartRepository};
use crate::domain::payment::{PaymentEvent, PaymentEventRepository};
use crate::domain::property::{Property, PropertyRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};

/// In-memory repository provider for development and testing
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    properties: InMemoryPropertyRepository,
    bookings: InMemoryBookingRepository,
    cart_items: InMemoryCartRepository,
    payment_events: InMemoryPaymentEventRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn properties(&self) -> &dyn PropertyRepository {
        &self.properties
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn cart_items(&self) -> &dyn CartRepository {
        &self.cart_items
    }

    fn payment_events(&self) -> &dyn PaymentEventRepository {
        &self.payment_events
    }
}

// ── Properties ──────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryPropertyRepository {
    items: DashMap<Uuid, Property>,
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn insert(&self, property: Property) -> DomainResult<()> {
        self.items.insert(property.id, property);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Property>> {
        Ok(self.items.get(&id).map(|p| p.clone()))
    }

    async fn list(&self) -> DomainResult<Vec<Property>> {
        let mut all: Vec<Property> = self.items.iter().map(|p| p.clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

// ── Bookings ────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryBookingRepository {
    // Single lock: check-and-insert must be atomic across the whole map
    items: Mutex<HashMap<Uuid, Booking>>,
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self.items.lock().unwrap().get(&id).cloned())
    }

    async fn find_active_for_property(&self, property_id: Uuid) -> DomainResult<Vec<Booking>> {
        let mut active: Vec<Booking> = self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.property_id == property_id && b.is_active())
            .cloned()
            .collect();
        active.sort_by_key(|b| b.interval.start);
        Ok(active)
    }

    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Booking>> {
        let mut owned: Vec<Booking> = self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn insert_if_available(&self, booking: Booking) -> DomainResult<Booking> {
        let mut items = self.items.lock().unwrap();

        let conflicts: Vec<_> = items
            .values()
            .filter(|b| {
                b.property_id == booking.property_id
                    && b.is_active()
                    && b.interval.overlaps(&booking.interval)
            })
            .map(|b| b.interval)
            .collect();

        if !conflicts.is_empty() {
            return Err(DomainError::Conflict { conflicts });
        }

        items.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> DomainResult<()> {
        let mut items = self.items.lock().unwrap();
        let booking = items
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        if booking.status != expected {
            return Err(DomainError::InvalidTransition {
                from: booking.status,
                to: next,
            });
        }

        booking.status = next;
        booking.updated_at = Utc::now();
        Ok(())
    }

    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Booking>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.status == BookingStatus::Pending && b.created_at < cutoff)
            .cloned()
            .collect())
    }
}

// ── Cart items ──────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryCartRepository {
    items: DashMap<Uuid, CartItem>,
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn insert(&self, item: CartItem) -> DomainResult<()> {
        self.items.insert(item.id, item);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<CartItem>> {
        Ok(self.items.get(&id).map(|i| i.clone()))
    }

    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<CartItem>> {
        let mut owned: Vec<CartItem> = self
            .items
            .iter()
            .filter(|i| i.user_id == user_id)
            .map(|i| i.clone())
            .collect();
        owned.sort_by_key(|i| i.created_at);
        Ok(owned)
    }

    async fn update(&self, item: CartItem) -> DomainResult<()> {
        if !self.items.contains_key(&item.id) {
            return Err(DomainError::not_found("CartItem", item.id));
        }
        self.items.insert(item.id, item);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("CartItem", id))
    }

    async fn clear_for_user(&self, user_id: Uuid) -> DomainResult<()> {
        self.items.retain(|_, item| item.user_id != user_id);
        Ok(())
    }
}

// ── Payment events ──────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryPaymentEventRepository {
    // Keyed by transaction_id; one lock mirrors the unique constraint
    items: Mutex<HashMap<String, PaymentEvent>>,
}

#[async_trait]
impl PaymentEventRepository for InMemoryPaymentEventRepository {
    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> DomainResult<Option<PaymentEvent>> {
        Ok(self.items.lock().unwrap().get(transaction_id).cloned())
    }

    async fn record(&self, event: PaymentEvent) -> DomainResult<bool> {
        let mut items = self.items.lock().unwrap();
        if items.contains_key(&event.transaction_id) {
            return Ok(false);
        }
        items.insert(event.transaction_id.clone(), event);
        Ok(true)
    }
}
