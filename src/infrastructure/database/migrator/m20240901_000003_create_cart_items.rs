//! Create cart_items table

use sea_orm_migration::prelude::*;

use super::m20240901_000001_create_properties::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CartItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CartItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(CartItems::UserId).uuid().not_null())
                    .col(ColumnDef::new(CartItems::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(CartItems::StartDate).date().not_null())
                    .col(ColumnDef::new(CartItems::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(CartItems::GuestCount)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(CartItems::QuotedTotal)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CartItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_items_property")
                            .from(CartItems::Table, CartItems::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cart_items_user")
                    .table(CartItems::Table)
                    .col(CartItems::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CartItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CartItems {
    Table,
    Id,
    UserId,
    PropertyId,
    StartDate,
    EndDate,
    GuestCount,
    QuotedTotal,
    CreatedAt,
}
