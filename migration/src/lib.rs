pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20260301_000001_initial_tables;
mod m20260305_000001_subscription_tiers;
mod m20260310_000001_shareable_links;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_initial_tables::Migration),
            Box::new(m20260305_000001_subscription_tiers::Migration),
            Box::new(m20260310_000001_shareable_links::Migration),
        ]
    }
}
