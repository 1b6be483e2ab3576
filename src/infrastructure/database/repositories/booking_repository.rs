//! SeaORM implementation of BookingRepository
//!
//! `insert_if_available` is the authoritative no-double-booking point:
//! the overlap re-check and the insert run inside a single database
//! transaction, so two concurrent checkouts for the same dates cannot
//! both commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionError, TransactionTrait,
};
use sea_orm::sea_query::Expr;
use tracing::debug;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::{DomainError, DomainResult, Interval};
use crate::infrastructure::database::entities::booking;

const ACTIVE_STATUSES: [&str; 2] = ["pending", "confirmed"];

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let interval = Interval::new(m.start_date, m.end_date)?;
    let status = BookingStatus::parse(&m.status)
        .ok_or_else(|| DomainError::Validation(format!("unknown booking status: {}", m.status)))?;
    Ok(Booking {
        id: m.id,
        property_id: m.property_id,
        user_id: m.user_id,
        interval,
        guest_count: m.guest_count as u32,
        total_price: m.total_price,
        status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(b: &Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        property_id: Set(b.property_id),
        user_id: Set(b.user_id),
        start_date: Set(b.interval.start),
        end_date: Set(b.interval.end),
        guest_count: Set(b.guest_count as i32),
        total_price: Set(b.total_price),
        status: Set(b.status.as_str().to_string()),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::TransientStore(format!("database error: {e}"))
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_active_for_property(&self, property_id: Uuid) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::PropertyId.eq(property_id))
            .filter(booking::Column::Status.is_in(ACTIVE_STATUSES))
            .order_by_asc(booking::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn insert_if_available(&self, new_booking: Booking) -> DomainResult<Booking> {
        debug!(
            booking_id = %new_booking.id,
            property_id = %new_booking.property_id,
            interval = %new_booking.interval,
            "Conditional insert"
        );

        let result = self
            .db
            .transaction::<_, Booking, DomainError>(move |txn| {
                Box::pin(async move {
                    // Re-check inside the transaction: any active booking
                    // overlapping [start, end) blocks the insert.
                    let conflicting = booking::Entity::find()
                        .filter(booking::Column::PropertyId.eq(new_booking.property_id))
                        .filter(booking::Column::Status.is_in(ACTIVE_STATUSES))
                        .filter(booking::Column::StartDate.lt(new_booking.interval.end))
                        .filter(booking::Column::EndDate.gt(new_booking.interval.start))
                        .all(txn)
                        .await
                        .map_err(db_err)?;

                    if !conflicting.is_empty() {
                        let conflicts = conflicting
                            .into_iter()
                            .map(|m| Interval::new(m.start_date, m.end_date))
                            .collect::<DomainResult<Vec<_>>>()?;
                        return Err(DomainError::Conflict { conflicts });
                    }

                    domain_to_active(&new_booking)
                        .insert(txn)
                        .await
                        .map_err(db_err)?;
                    Ok(new_booking)
                })
            })
            .await;

        match result {
            Ok(b) => Ok(b),
            Err(TransactionError::Connection(e)) => Err(db_err(e)),
            Err(TransactionError::Transaction(e)) => Err(e),
        }
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> DomainResult<()> {
        // Optimistic guard: the update only lands if the row is still in
        // the expected status.
        let res = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(next.as_str()))
            .col_expr(booking::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(booking::Column::Id.eq(id))
            .filter(booking::Column::Status.eq(expected.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if res.rows_affected > 0 {
            return Ok(());
        }

        // Nothing updated: distinguish a missing booking from one that
        // moved status under us.
        match self.find_by_id(id).await? {
            None => Err(DomainError::not_found("Booking", id)),
            Some(b) => Err(DomainError::InvalidTransition {
                from: b.status,
                to: next,
            }),
        }
    }

    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(BookingStatus::Pending.as_str()))
            .filter(booking::Column::CreatedAt.lt(cutoff))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
