//! Cryptographic helpers for gateway notification verification

pub mod signature;

pub use signature::{compute_signature, verify_notification};
