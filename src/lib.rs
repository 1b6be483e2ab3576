//! # Staybook Reservation Engine
//!
//! Availability, pricing, cart and booking core for a property booking
//! marketplace, with payment gateway reconciliation.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, value types and repository traits
//! - **application**: Services orchestrating the domain (availability,
//!   cart, booking lifecycle, payment reconciliation, hold expiry)
//! - **infrastructure**: External concerns (SeaORM persistence, gateway
//!   signature crypto, in-memory repositories for tests)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Cross-cutting helpers (retry, graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiState};
