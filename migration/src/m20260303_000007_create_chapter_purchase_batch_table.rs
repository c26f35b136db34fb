use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChapterPurchaseBatch::Table)
                    .if_not_exists()
                    .col(pk_auto(ChapterPurchaseBatch::Id))
                    .col(big_integer(ChapterPurchaseBatch::UserId))
                    .col(integer(ChapterPurchaseBatch::BookId))
                    .col(big_integer(ChapterPurchaseBatch::TotalPrice))
                    .col(integer(ChapterPurchaseBatch::ChapterCount))
                    .col(timestamp_with_time_zone(ChapterPurchaseBatch::PurchasedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chapter_purchase_batch_user")
                    .table(ChapterPurchaseBatch::Table)
                    .col(ChapterPurchaseBatch::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChapterPurchaseBatch::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChapterPurchaseBatch {
    Table,
    Id,
    UserId,
    BookId,
    TotalPrice,
    ChapterCount,
    PurchasedAt,
}
