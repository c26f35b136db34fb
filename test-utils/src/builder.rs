use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Book, Chapter};
///
/// let test = TestBuilder::new()
///     .with_table(Book)
///     .with_table(Chapter)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// CREATE INDEX statements executed after all tables exist.
    indexes: Vec<IndexCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after their referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the catalog tables (Book, Chapter).
    pub fn with_catalog_tables(self) -> Self {
        self.with_table(Book).with_table(Chapter)
    }

    /// Adds the wallet tables with the journal's `(reference, kind)` unique index.
    pub fn with_wallet_tables(mut self) -> Self {
        self.indexes.push(
            Index::create()
                .unique()
                .name("idx_wallet_transaction_reference_kind")
                .table(entity::wallet_transaction::Entity)
                .col(entity::wallet_transaction::Column::Reference)
                .col(entity::wallet_transaction::Column::Kind)
                .to_owned(),
        );
        self.with_table(Wallet).with_table(WalletTransaction)
    }

    /// Adds the purchase ledger tables (chapter, book and batch purchases) with their
    /// per-user uniqueness indexes.
    pub fn with_ledger_tables(mut self) -> Self {
        self.indexes.push(
            Index::create()
                .unique()
                .name("idx_chapter_purchase_user_chapter")
                .table(entity::chapter_purchase::Entity)
                .col(entity::chapter_purchase::Column::UserId)
                .col(entity::chapter_purchase::Column::ChapterId)
                .to_owned(),
        );
        self.indexes.push(
            Index::create()
                .unique()
                .name("idx_book_purchase_user_book")
                .table(entity::book_purchase::Entity)
                .col(entity::book_purchase::Column::UserId)
                .col(entity::book_purchase::Column::BookId)
                .to_owned(),
        );
        self.with_table(ChapterPurchase)
            .with_table(BookPurchase)
            .with_table(ChapterPurchaseBatch)
    }

    /// Adds every table needed by the purchase flow: catalog, wallet and ledger.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_purchase_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_purchase_tables(self) -> Self {
        self.with_catalog_tables()
            .with_wallet_tables()
            .with_ledger_tables()
    }

    /// Builds and initializes the test context with configured tables and indexes.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
