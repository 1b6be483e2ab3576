//! SeaORM implementation of PaymentEventRepository
//!
//! The unique index on transaction_id turns a concurrent duplicate
//! delivery into a detectable constraint violation instead of a double
//! apply.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use tracing::debug;

use crate::domain::payment::{PaymentEvent, PaymentEventRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::payment_event;

pub struct SeaOrmPaymentEventRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: payment_event::Model) -> PaymentEvent {
    PaymentEvent {
        id: m.id,
        transaction_id: m.transaction_id,
        booking_id: m.booking_id,
        transaction_status: m.transaction_status,
        applied_at: m.applied_at,
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::TransientStore(format!("database error: {e}"))
}

// ── PaymentEventRepository impl ─────────────────────────────────

#[async_trait]
impl PaymentEventRepository for SeaOrmPaymentEventRepository {
    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> DomainResult<Option<PaymentEvent>> {
        let model = payment_event::Entity::find()
            .filter(payment_event::Column::TransactionId.eq(transaction_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn record(&self, event: PaymentEvent) -> DomainResult<bool> {
        debug!(
            transaction_id = %event.transaction_id,
            booking_id = %event.booking_id,
            "Recording payment event"
        );

        let model = payment_event::ActiveModel {
            id: Set(event.id),
            transaction_id: Set(event.transaction_id),
            booking_id: Set(event.booking_id),
            transaction_status: Set(event.transaction_status),
            applied_at: Set(event.applied_at),
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Ok(false),
                _ => Err(db_err(e)),
            },
        }
    }
}
