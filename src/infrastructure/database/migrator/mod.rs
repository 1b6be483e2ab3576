//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240901_000001_create_properties;
mod m20240901_000002_create_bookings;
mod m20240901_000003_create_cart_items;
mod m20240901_000004_create_payment_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_000001_create_properties::Migration),
            Box::new(m20240901_000002_create_bookings::Migration),
            Box::new(m20240901_000003_create_cart_items::Migration),
            Box::new(m20240901_000004_create_payment_events::Migration),
        ]
    }
}
