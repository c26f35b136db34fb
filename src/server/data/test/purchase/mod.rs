use crate::server::{
    data::{chapter::ChapterRepository, purchase::PurchaseLedger},
    error::{purchase::PurchaseError, AppError},
    model::{
        chapter::Chapter,
        money::Money,
        purchase::{RecordBatchPurchaseParams, RecordBookPurchaseParams},
        user::UserId,
    },
};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod list_purchases;
mod record_batch_purchase;
mod record_book_purchase;
mod record_chapter_purchase;
mod summary;

fn user(id: i64) -> UserId {
    UserId::new(id).unwrap()
}

fn cents(amount: i64) -> Money {
    Money::from_cents(amount).unwrap()
}

async fn load_chapters(db: &sea_orm::DatabaseConnection, book_id: i32) -> Vec<Chapter> {
    ChapterRepository::new(db)
        .get_by_book_id(book_id)
        .await
        .unwrap()
}

async fn count_chapter_rows(db: &sea_orm::DatabaseConnection, user_id: i64) -> Result<u64, DbErr> {
    entity::prelude::ChapterPurchase::find()
        .filter(entity::chapter_purchase::Column::UserId.eq(user_id))
        .count(db)
        .await
}
