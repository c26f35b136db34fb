//! Chapter factory for creating test chapter entities.
//!
//! Chapters default to a paid, non-VIP chapter priced at 100 cents. Marking a chapter
//! free forces its price to zero so factories never produce rows that violate the
//! free-chapter pricing invariant.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test chapters with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let chapter = ChapterFactory::new(&db, book.id)
///     .chapter_num(3)
///     .vip(true)
///     .price(199)
///     .build()
///     .await?;
/// ```
pub struct ChapterFactory<'a> {
    db: &'a DatabaseConnection,
    book_id: i32,
    chapter_num: i32,
    title: String,
    is_free: bool,
    is_vip: bool,
    price: i64,
    word_count: i32,
}

impl<'a> ChapterFactory<'a> {
    /// Creates a new ChapterFactory with default values.
    ///
    /// Defaults:
    /// - chapter_num: unique counter value
    /// - title: `"Chapter {id}"`
    /// - is_free: `false`
    /// - is_vip: `false`
    /// - price: `100`
    /// - word_count: `3000`
    pub fn new(db: &'a DatabaseConnection, book_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            book_id,
            chapter_num: id as i32,
            title: format!("Chapter {}", id),
            is_free: false,
            is_vip: false,
            price: 100,
            word_count: 3000,
        }
    }

    pub fn chapter_num(mut self, chapter_num: i32) -> Self {
        self.chapter_num = chapter_num;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Marks the chapter free; free chapters are always stored with a zero price.
    pub fn free(mut self, is_free: bool) -> Self {
        self.is_free = is_free;
        self
    }

    pub fn vip(mut self, is_vip: bool) -> Self {
        self.is_vip = is_vip;
        self
    }

    /// Sets the price in cents. Ignored for free chapters.
    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    pub fn word_count(mut self, word_count: i32) -> Self {
        self.word_count = word_count;
        self
    }

    /// Builds and inserts the chapter entity into the database.
    pub async fn build(self) -> Result<entity::chapter::Model, DbErr> {
        let price = if self.is_free { 0 } else { self.price };

        entity::chapter::ActiveModel {
            book_id: ActiveValue::Set(self.book_id),
            chapter_num: ActiveValue::Set(self.chapter_num),
            title: ActiveValue::Set(self.title),
            is_free: ActiveValue::Set(self.is_free),
            is_vip: ActiveValue::Set(self.is_vip),
            price: ActiveValue::Set(price),
            word_count: ActiveValue::Set(self.word_count),
            published_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a free chapter in the given book.
pub async fn create_free_chapter(
    db: &DatabaseConnection,
    book_id: i32,
) -> Result<entity::chapter::Model, DbErr> {
    ChapterFactory::new(db, book_id).free(true).build().await
}

/// Creates a paid, non-VIP chapter with the given price in cents.
pub async fn create_paid_chapter(
    db: &DatabaseConnection,
    book_id: i32,
    price: i64,
) -> Result<entity::chapter::Model, DbErr> {
    ChapterFactory::new(db, book_id).price(price).build().await
}

/// Creates a VIP chapter with the given price in cents.
pub async fn create_vip_chapter(
    db: &DatabaseConnection,
    book_id: i32,
    price: i64,
) -> Result<entity::chapter::Model, DbErr> {
    ChapterFactory::new(db, book_id)
        .vip(true)
        .price(price)
        .build()
        .await
}
