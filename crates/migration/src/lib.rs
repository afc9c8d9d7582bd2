//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_owner;
mod m20240101_000002_create_owner_credentials;
mod m20240101_000003_create_vet;
mod m20240101_000004_create_pet;
mod m20240101_000005_create_appointment;
mod m20240101_000006_create_visit;
mod m20240101_000007_create_review;
mod m20240101_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_owner::Migration),
            Box::new(m20240101_000002_create_owner_credentials::Migration),
            Box::new(m20240101_000003_create_vet::Migration),
            Box::new(m20240101_000004_create_pet::Migration),
            Box::new(m20240101_000005_create_appointment::Migration),
            Box::new(m20240101_000006_create_visit::Migration),
            Box::new(m20240101_000007_create_review::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000008_add_indexes::Migration),
        ]
    }
}
