//! HTTP API modules, one per resource

pub mod availability;
pub mod bookings;
pub mod cart;
pub mod health;
pub mod payments;
pub mod properties;
