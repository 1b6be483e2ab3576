//! Property aggregate
//!
//! Contains the Property entity and repository interface.

pub mod model;
pub mod repository;

pub use model::Property;
pub use repository::PropertyRepository;
