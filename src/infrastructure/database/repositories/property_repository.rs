//! SeaORM implementation of PropertyRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::property::{Property, PropertyRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::property;

pub struct SeaOrmPropertyRepository {
    db: DatabaseConnection,
}

impl SeaOrmPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: property::Model) -> Property {
    Property {
        id: m.id,
        name: m.name,
        nightly_rate: m.nightly_rate,
        max_guests: m.max_guests as u32,
        created_at: m.created_at,
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::TransientStore(format!("database error: {e}"))
}

// ── PropertyRepository impl ─────────────────────────────────────

#[async_trait]
impl PropertyRepository for SeaOrmPropertyRepository {
    async fn insert(&self, p: Property) -> DomainResult<()> {
        let model = property::ActiveModel {
            id: Set(p.id),
            name: Set(p.name),
            nightly_rate: Set(p.nightly_rate),
            max_guests: Set(p.max_guests as i32),
            created_at: Set(p.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Property>> {
        let model = property::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self) -> DomainResult<Vec<Property>> {
        let models = property::Entity::find()
            .order_by_desc(property::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
