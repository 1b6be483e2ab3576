//! Cart repository interface
//!
//! Ordinary keyed CRUD; no atomicity requirements beyond per-row
//! consistency.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::CartItem;
use crate::domain::DomainResult;

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Save a new cart item
    async fn insert(&self, item: CartItem) -> DomainResult<()>;

    /// Find cart item by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<CartItem>>;

    /// All cart items for a user, oldest first
    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<CartItem>>;

    /// Replace an existing cart item
    async fn update(&self, item: CartItem) -> DomainResult<()>;

    /// Delete a cart item by ID
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// Delete every cart item owned by a user
    async fn clear_for_user(&self, user_id: Uuid) -> DomainResult<()>;
}
