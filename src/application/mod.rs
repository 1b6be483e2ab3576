//! Application layer: orchestrates domain operations over the repositories

pub mod services;

pub use services::{
    Availability, AvailabilityService, BookingService, CartItemPatch, CartService,
    CheckoutFailure, CheckoutOutcome, HoldExpiryConfig, HoldExpirySweeper,
    PaymentReconciliationService, ReconciliationOutcome,
};
