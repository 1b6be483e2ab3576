//! Create payment_events table
//!
//! The unique index on transaction_id is what makes at-least-once
//! webhook delivery safe to replay.

use sea_orm_migration::prelude::*;

use super::m20240901_000002_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentEvents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentEvents::TransactionId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentEvents::BookingId).uuid().not_null())
                    .col(
                        ColumnDef::new(PaymentEvents::TransactionStatus)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentEvents::AppliedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_events_booking")
                            .from(PaymentEvents::Table, PaymentEvents::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_events_transaction")
                    .table(PaymentEvents::Table)
                    .col(PaymentEvents::TransactionId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentEvents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PaymentEvents {
    Table,
    Id,
    TransactionId,
    BookingId,
    TransactionStatus,
    AppliedAt,
}
