//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::cart::CartRepository;
use crate::domain::payment::PaymentEventRepository;
use crate::domain::property::PropertyRepository;
use crate::domain::repositories::RepositoryProvider;

use super::booking_repository::SeaOrmBookingRepository;
use super::cart_repository::SeaOrmCartRepository;
use super::payment_event_repository::SeaOrmPaymentEventRepository;
use super::property_repository::SeaOrmPropertyRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository
/// accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let active = repos.bookings().find_active_for_property(id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    properties: SeaOrmPropertyRepository,
    bookings: SeaOrmBookingRepository,
    cart_items: SeaOrmCartRepository,
    payment_events: SeaOrmPaymentEventRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            properties: SeaOrmPropertyRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            cart_items: SeaOrmCartRepository::new(db.clone()),
            payment_events: SeaOrmPaymentEventRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
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
