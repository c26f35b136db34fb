//! Chapter fixtures for creating in-memory test data.

use chrono::Utc;
use entity::chapter;

/// Default book ID for fixture chapters.
pub const DEFAULT_BOOK_ID: i32 = 1;

/// Default word count for fixture chapters.
pub const DEFAULT_WORD_COUNT: i32 = 3000;

/// Creates a paid, non-VIP chapter entity model.
///
/// # Default Values
/// - book_id: `1`
/// - chapter_num: same as `id`
/// - title: `"Chapter {id}"`
/// - is_free: `false`
/// - is_vip: `false`
/// - word_count: `3000`
///
/// # Example
///
/// ```rust,ignore
/// let chapter = fixture::chapter::paid(1, 199);
/// assert_eq!(chapter.price, 199);
/// ```
pub fn paid(id: i32, price: i64) -> chapter::Model {
    chapter::Model {
        id,
        book_id: DEFAULT_BOOK_ID,
        chapter_num: id,
        title: format!("Chapter {}", id),
        is_free: false,
        is_vip: false,
        price,
        word_count: DEFAULT_WORD_COUNT,
        published_at: Utc::now(),
    }
}

/// Creates a free chapter entity model (price zero).
pub fn free(id: i32) -> chapter::Model {
    chapter::Model {
        is_free: true,
        price: 0,
        ..paid(id, 0)
    }
}

/// Creates a VIP chapter entity model.
pub fn vip(id: i32, price: i64) -> chapter::Model {
    chapter::Model {
        is_vip: true,
        ..paid(id, price)
    }
}
