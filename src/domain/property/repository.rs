//! Property repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Property;
use crate::domain::DomainResult;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Save a new property
    async fn insert(&self, property: Property) -> DomainResult<()>;

    /// Find property by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Property>>;

    /// All properties, newest first
    async fn list(&self) -> DomainResult<Vec<Property>>;
}
