//! Booking aggregate
//!
//! Contains the Booking entity, lifecycle states, and repository interface.

pub mod model;
pub mod repository;

pub use model::{Booking, BookingStatus};
pub use repository::BookingRepository;
