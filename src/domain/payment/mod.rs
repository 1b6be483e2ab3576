//! Payment reconciliation types
//!
//! Gateway notification vocabulary and the applied-transaction ledger
//! that makes webhook processing idempotent.

pub mod model;
pub mod repository;

pub use model::{GatewayAction, PaymentEvent, PaymentNotification};
pub use repository::PaymentEventRepository;
