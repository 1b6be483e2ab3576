//! SeaORM implementation of CartRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::cart::{CartItem, CartRepository};
use crate::domain::{DomainError, DomainResult, Interval};
use crate::infrastructure::database::entities::cart_item;

pub struct SeaOrmCartRepository {
    db: DatabaseConnection,
}

impl SeaOrmCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: cart_item::Model) -> DomainResult<CartItem> {
    let interval = Interval::new(m.start_date, m.end_date)?;
    Ok(CartItem {
        id: m.id,
        user_id: m.user_id,
        property_id: m.property_id,
        interval,
        guest_count: m.guest_count as u32,
        quoted_total: m.quoted_total,
        created_at: m.created_at,
    })
}

fn domain_to_active(item: &CartItem) -> cart_item::ActiveModel {
    cart_item::ActiveModel {
        id: Set(item.id),
        user_id: Set(item.user_id),
        property_id: Set(item.property_id),
        start_date: Set(item.interval.start),
        end_date: Set(item.interval.end),
        guest_count: Set(item.guest_count as i32),
        quoted_total: Set(item.quoted_total),
        created_at: Set(item.created_at),
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::TransientStore(format!("database error: {e}"))
}

// ── CartRepository impl ─────────────────────────────────────────

#[async_trait]
impl CartRepository for SeaOrmCartRepository {
    async fn insert(&self, item: CartItem) -> DomainResult<()> {
        debug!(cart_item_id = %item.id, user_id = %item.user_id, "Saving cart item");
        domain_to_active(&item)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<CartItem>> {
        let model = cart_item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<CartItem>> {
        let models = cart_item::Entity::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .order_by_asc(cart_item::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, item: CartItem) -> DomainResult<()> {
        let existing = cart_item::Entity::find_by_id(item.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("CartItem", item.id));
        }

        domain_to_active(&item)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let res = cart_item::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("CartItem", id));
        }
        Ok(())
    }

    async fn clear_for_user(&self, user_id: Uuid) -> DomainResult<()> {
        cart_item::Entity::delete_many()
            .filter(cart_item::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
