use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChapterPurchaseDto {
    pub id: i32,
    pub user_id: i64,
    pub chapter_id: i32,
    pub book_id: i32,
    /// Amount charged in cents
    pub price: i64,
    /// Set when the chapter was bought as part of a book bundle
    pub book_purchase_id: Option<i32>,
    /// Set when the chapter was bought in a multi-chapter batch
    pub batch_id: Option<i32>,
    pub purchased_at: DateTime<Utc>,
}

/// Chapters to buy in one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PurchaseChaptersDto {
    pub chapter_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChapterPurchaseBatchDto {
    pub id: i32,
    pub user_id: i64,
    pub book_id: i32,
    /// Amount charged in cents
    pub total_price: i64,
    pub total_price_display: String,
    /// One record per chapter bought, in chapter order
    pub purchases: Vec<ChapterPurchaseDto>,
    pub purchased_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookPurchaseDto {
    pub id: i32,
    pub user_id: i64,
    pub book_id: i32,
    /// Amount charged in cents
    pub total_price: i64,
    /// Undiscounted sum in cents
    pub original_price: i64,
    pub discount_percent: i32,
    pub chapter_count: i32,
    pub purchased_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedChapterPurchasesDto {
    pub purchases: Vec<ChapterPurchaseDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PurchasedChapterIdsDto {
    pub book_id: i32,
    pub chapter_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PurchaseSummaryDto {
    pub chapter_count: u64,
    pub book_count: u64,
    /// Sum of all chapter purchase prices in cents
    pub total_spent: i64,
    pub total_spent_display: String,
}
