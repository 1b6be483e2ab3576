//! Unified repository access for the domain layer

use super::booking::BookingRepository;
use super::cart::CartRepository;
use super::payment::PaymentEventRepository;
use super::property::PropertyRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let active = repos.bookings().find_active_for_property(id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn properties(&self) -> &dyn PropertyRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn cart_items(&self) -> &dyn CartRepository;
    fn payment_events(&self) -> &dyn PaymentEventRepository;
}
