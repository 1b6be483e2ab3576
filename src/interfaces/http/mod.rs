//! HTTP REST API interface
//!
//! - `common`: response envelope, validated JSON, user identity
//! - `modules`: one module per resource (dto + handlers)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiState};
