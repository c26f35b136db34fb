//! Purchase factory for seeding ledger rows directly.
//!
//! These helpers bypass the purchase flow entirely (no wallet movement, no events),
//! which is useful for setting up "already purchased" states.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a chapter purchase row for `user_id` at the chapter's list price.
pub async fn create_chapter_purchase(
    db: &DatabaseConnection,
    user_id: i64,
    chapter: &entity::chapter::Model,
) -> Result<entity::chapter_purchase::Model, DbErr> {
    entity::chapter_purchase::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        chapter_id: ActiveValue::Set(chapter.id),
        book_id: ActiveValue::Set(chapter.book_id),
        price: ActiveValue::Set(chapter.price),
        book_purchase_id: ActiveValue::Set(None),
        batch_id: ActiveValue::Set(None),
        purchased_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Inserts a book purchase row without any accompanying chapter rows.
pub async fn create_book_purchase(
    db: &DatabaseConnection,
    user_id: i64,
    book_id: i32,
    total_price: i64,
) -> Result<entity::book_purchase::Model, DbErr> {
    entity::book_purchase::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        book_id: ActiveValue::Set(book_id),
        total_price: ActiveValue::Set(total_price),
        original_price: ActiveValue::Set(total_price),
        discount_percent: ActiveValue::Set(0),
        chapter_count: ActiveValue::Set(0),
        purchased_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
