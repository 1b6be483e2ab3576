//! Cart aggregate
//!
//! Contains the CartItem entity and repository interface.

pub mod model;
pub mod repository;

pub use model::CartItem;
pub use repository::CartRepository;
