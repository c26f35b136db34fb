use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_book_table::Book;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chapter::Table)
                    .if_not_exists()
                    .col(pk_auto(Chapter::Id))
                    .col(integer(Chapter::BookId))
                    .col(integer(Chapter::ChapterNum))
                    .col(string(Chapter::Title))
                    .col(boolean(Chapter::IsFree).default(false))
                    .col(boolean(Chapter::IsVip).default(false))
                    .col(big_integer(Chapter::Price).default(0))
                    .col(integer(Chapter::WordCount).default(0))
                    .col(timestamp_with_time_zone(Chapter::PublishedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chapter_book_id")
                            .from(Chapter::Table, Chapter::BookId)
                            .to(Book::Table, Book::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_chapter_book_num")
                            .col(Chapter::BookId)
                            .col(Chapter::ChapterNum),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chapter::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Chapter {
    Table,
    Id,
    BookId,
    ChapterNum,
    Title,
    IsFree,
    IsVip,
    Price,
    WordCount,
    PublishedAt,
}
