use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChapterPurchase::Table)
                    .if_not_exists()
                    .col(pk_auto(ChapterPurchase::Id))
                    .col(big_integer(ChapterPurchase::UserId))
                    .col(integer(ChapterPurchase::ChapterId))
                    .col(integer(ChapterPurchase::BookId))
                    .col(big_integer(ChapterPurchase::Price))
                    .col(integer_null(ChapterPurchase::BookPurchaseId))
                    .col(integer_null(ChapterPurchase::BatchId))
                    .col(timestamp_with_time_zone(ChapterPurchase::PurchasedAt))
                    // Sole source of truth for at-most-once chapter purchases.
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_chapter_purchase_user_chapter")
                            .col(ChapterPurchase::UserId)
                            .col(ChapterPurchase::ChapterId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chapter_purchase_user_book")
                    .table(ChapterPurchase::Table)
                    .col(ChapterPurchase::UserId)
                    .col(ChapterPurchase::BookId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChapterPurchase::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChapterPurchase {
    Table,
    Id,
    UserId,
    ChapterId,
    BookId,
    Price,
    BookPurchaseId,
    BatchId,
    PurchasedAt,
}
