//! SeaORM entities

pub mod booking;
pub mod cart_item;
pub mod payment_event;
pub mod property;
