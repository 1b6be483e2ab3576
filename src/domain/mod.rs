//! Core business entities, value types, and repository traits

pub mod booking;
pub mod cart;
pub mod error;
pub mod interval;
pub mod payment;
pub mod pricing;
pub mod property;
pub mod repositories;

// Re-export commonly used types
pub use booking::{Booking, BookingRepository, BookingStatus};
pub use cart::{CartItem, CartRepository};
pub use error::{DomainError, DomainResult};
pub use interval::Interval;
pub use payment::{GatewayAction, PaymentEvent, PaymentEventRepository, PaymentNotification};
pub use pricing::{quote, PriceQuote};
pub use property::{Property, PropertyRepository};
pub use repositories::RepositoryProvider;
