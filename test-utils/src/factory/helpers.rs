//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a book whose chapters are priced as given.
///
/// Every price becomes one paid, non-VIP chapter numbered from 1 in order. A price of
/// `0` produces a free chapter instead.
///
/// # Arguments
/// - `db` - Database connection
/// - `prices` - Chapter prices in cents
///
/// # Returns
/// - `Ok((book, chapters))` - Created book and its chapters in chapter order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_book_with_prices(
    db: &DatabaseConnection,
    prices: &[i64],
) -> Result<(entity::book::Model, Vec<entity::chapter::Model>), DbErr> {
    let book = crate::factory::book::create_book(db).await?;

    let mut chapters = Vec::with_capacity(prices.len());
    for (index, price) in prices.iter().enumerate() {
        let chapter = crate::factory::chapter::ChapterFactory::new(db, book.id)
            .chapter_num(index as i32 + 1)
            .free(*price == 0)
            .price(*price)
            .build()
            .await?;
        chapters.push(chapter);
    }

    Ok((book, chapters))
}
