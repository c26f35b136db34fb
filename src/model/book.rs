use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Bundle quote for the chapters of a book the caller does not own yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookPriceDto {
    pub book_id: i32,
    /// Sum of remaining paid chapter prices in cents
    pub original_price: i64,
    /// Bundle price after discount in cents
    pub discounted_price: i64,
    pub discount_percent: i32,
    pub chapter_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogChapterDto {
    pub id: i32,
    pub chapter_num: i32,
    pub title: String,
    pub word_count: i32,
    pub is_free: bool,
    pub is_vip: bool,
    /// Price in cents
    pub price: i64,
    pub is_purchased: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookCatalogDto {
    pub book_id: i32,
    pub title: String,
    pub author: String,
    /// Rating formatted as `"4.5"`, absent for unrated books
    pub rating: Option<String>,
    pub chapters: Vec<CatalogChapterDto>,
    pub free_count: u64,
    pub paid_count: u64,
    pub vip_count: u64,
}
