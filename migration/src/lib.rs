pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_book_table;
mod m20260301_000002_create_chapter_table;
mod m20260301_000003_create_wallet_table;
mod m20260301_000004_create_wallet_transaction_table;
mod m20260302_000005_create_chapter_purchase_table;
mod m20260302_000006_create_book_purchase_table;
mod m20260303_000007_create_chapter_purchase_batch_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_book_table::Migration),
            Box::new(m20260301_000002_create_chapter_table::Migration),
            Box::new(m20260301_000003_create_wallet_table::Migration),
            Box::new(m20260301_000004_create_wallet_transaction_table::Migration),
            Box::new(m20260302_000005_create_chapter_purchase_table::Migration),
            Box::new(m20260302_000006_create_book_purchase_table::Migration),
            Box::new(m20260303_000007_create_chapter_purchase_batch_table::Migration),
        ]
    }
}
