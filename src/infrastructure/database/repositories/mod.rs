//! SeaORM repository implementations

mod booking_repository;
mod cart_repository;
mod payment_event_repository;
mod property_repository;
mod repository_provider;

pub use booking_repository::SeaOrmBookingRepository;
pub use cart_repository::SeaOrmCartRepository;
pub use payment_event_repository::SeaOrmPaymentEventRepository;
pub use property_repository::SeaOrmPropertyRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
