pub use sea_orm_migration::MigratorTrait;
use sea_orm_migration::prelude::*;

mod m20261016_000001_create_books;
mod m20261016_000002_create_borrows;
mod m20261016_000003_create_notifications;
mod m20261016_000004_add_lifecycle_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_create_books::Migration),
            Box::new(m20261016_000002_create_borrows::Migration),
            Box::new(m20261016_000003_create_notifications::Migration),
            Box::new(m20261016_000004_add_lifecycle_indexes::Migration),
        ]
    }
}
