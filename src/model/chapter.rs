use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChapterPriceDto {
    pub chapter_id: i32,
    pub book_id: i32,
    pub is_free: bool,
    pub is_vip: bool,
    /// Price in cents
    pub price: i64,
    /// Price formatted as `"1.99"`
    pub price_display: String,
}

/// Access verdict for a single chapter and caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChapterAccessDto {
    pub chapter_id: i32,
    pub title: String,
    pub chapter_num: i32,
    pub word_count: i32,
    pub is_free: bool,
    pub is_vip: bool,
    /// Price in cents
    pub price: i64,
    pub is_purchased: bool,
    pub purchased_at: Option<DateTime<Utc>>,
    pub can_access: bool,
    /// One of `free`, `vip`, `purchased`, `locked`
    pub access_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChapterSummaryDto {
    pub id: i32,
    pub chapter_num: i32,
    pub title: String,
    pub word_count: i32,
    pub is_free: bool,
    pub is_vip: bool,
    /// Price in cents
    pub price: i64,
}

/// A subset of a book's chapters, in chapter order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookChaptersDto {
    pub book_id: i32,
    pub chapters: Vec<ChapterSummaryDto>,
}
