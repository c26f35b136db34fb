use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookPurchase::Table)
                    .if_not_exists()
                    .col(pk_auto(BookPurchase::Id))
                    .col(big_integer(BookPurchase::UserId))
                    .col(integer(BookPurchase::BookId))
                    .col(big_integer(BookPurchase::TotalPrice))
                    .col(big_integer(BookPurchase::OriginalPrice))
                    .col(integer(BookPurchase::DiscountPercent))
                    .col(integer(BookPurchase::ChapterCount))
                    .col(timestamp_with_time_zone(BookPurchase::PurchasedAt))
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_book_purchase_user_book")
                            .col(BookPurchase::UserId)
                            .col(BookPurchase::BookId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookPurchase::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BookPurchase {
    Table,
    Id,
    UserId,
    BookId,
    TotalPrice,
    OriginalPrice,
    DiscountPercent,
    ChapterCount,
    PurchasedAt,
}
