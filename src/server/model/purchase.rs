//! Purchase ledger domain models and parameters.

use chrono::{DateTime, Utc};

use crate::server::{
    error::internal::InternalError,
    model::{chapter::Chapter, money::Money, user::UserId},
};

/// A per-user, per-chapter entitlement. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPurchase {
    pub id: i32,
    pub user_id: UserId,
    pub chapter_id: i32,
    pub book_id: i32,
    pub price: Money,
    /// Bundle this row was created by, if any.
    pub book_purchase_id: Option<i32>,
    /// Multi-chapter batch this row was created by, if any.
    pub batch_id: Option<i32>,
    pub purchased_at: DateTime<Utc>,
}

impl ChapterPurchase {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::chapter_purchase::Model) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            user_id: UserId::new(entity.user_id)
                .ok_or(InternalError::InvalidStoredUserId(entity.user_id))?,
            chapter_id: entity.chapter_id,
            book_id: entity.book_id,
            price: stored_money("chapter_purchase", entity.id, "price", entity.price)?,
            book_purchase_id: entity.book_purchase_id,
            batch_id: entity.batch_id,
            purchased_at: entity.purchased_at,
        })
    }

    pub fn into_dto(self) -> crate::model::purchase::ChapterPurchaseDto {
        crate::model::purchase::ChapterPurchaseDto {
            id: self.id,
            user_id: self.user_id.as_i64(),
            chapter_id: self.chapter_id,
            book_id: self.book_id,
            price: self.price.cents(),
            book_purchase_id: self.book_purchase_id,
            batch_id: self.batch_id,
            purchased_at: self.purchased_at,
        }
    }
}

/// A whole-book bundle transaction. Covers only the chapters that were paid and
/// not yet owned at purchase time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPurchase {
    pub id: i32,
    pub user_id: UserId,
    pub book_id: i32,
    pub total_price: Money,
    pub original_price: Money,
    pub discount_percent: i32,
    pub chapter_count: i32,
    pub purchased_at: DateTime<Utc>,
}

impl BookPurchase {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::book_purchase::Model) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            user_id: UserId::new(entity.user_id)
                .ok_or(InternalError::InvalidStoredUserId(entity.user_id))?,
            book_id: entity.book_id,
            total_price: stored_money("book_purchase", entity.id, "total_price", entity.total_price)?,
            original_price: stored_money(
                "book_purchase",
                entity.id,
                "original_price",
                entity.original_price,
            )?,
            discount_percent: entity.discount_percent,
            chapter_count: entity.chapter_count,
            purchased_at: entity.purchased_at,
        })
    }

    pub fn into_dto(self) -> crate::model::purchase::BookPurchaseDto {
        crate::model::purchase::BookPurchaseDto {
            id: self.id,
            user_id: self.user_id.as_i64(),
            book_id: self.book_id,
            total_price: self.total_price.cents(),
            original_price: self.original_price.cents(),
            discount_percent: self.discount_percent,
            chapter_count: self.chapter_count,
            purchased_at: self.purchased_at,
        }
    }
}

/// Several chapters of one book bought together at their list prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPurchaseBatch {
    pub id: i32,
    pub user_id: UserId,
    pub book_id: i32,
    pub total_price: Money,
    /// Chapter rows written with the batch, in chapter order.
    pub purchases: Vec<ChapterPurchase>,
    pub purchased_at: DateTime<Utc>,
}

impl ChapterPurchaseBatch {
    pub fn from_entity(
        entity: entity::chapter_purchase_batch::Model,
        purchases: Vec<ChapterPurchase>,
    ) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            user_id: UserId::new(entity.user_id)
                .ok_or(InternalError::InvalidStoredUserId(entity.user_id))?,
            book_id: entity.book_id,
            total_price: stored_money(
                "chapter_purchase_batch",
                entity.id,
                "total_price",
                entity.total_price,
            )?,
            purchases,
            purchased_at: entity.purchased_at,
        })
    }

    pub fn chapter_ids(&self) -> Vec<i32> {
        self.purchases.iter().map(|p| p.chapter_id).collect()
    }

    pub fn into_dto(self) -> crate::model::purchase::ChapterPurchaseBatchDto {
        crate::model::purchase::ChapterPurchaseBatchDto {
            id: self.id,
            user_id: self.user_id.as_i64(),
            book_id: self.book_id,
            total_price: self.total_price.cents(),
            total_price_display: self.total_price.to_string(),
            purchases: self.purchases.into_iter().map(|p| p.into_dto()).collect(),
            purchased_at: self.purchased_at,
        }
    }
}

fn stored_money(table: &str, id: i32, field: &'static str, cents: i64) -> Result<Money, InternalError> {
    Money::from_cents(cents).map_err(|e| InternalError::InvalidStoredValue {
        record: format!("{} {}", table, id),
        field,
        reason: e.to_string(),
    })
}

/// Parameters for recording a bundle purchase in the ledger.
#[derive(Debug, Clone)]
pub struct RecordBookPurchaseParams {
    pub user_id: UserId,
    pub book_id: i32,
    /// Paid chapters covered by the bundle. Free chapters are ignored.
    pub chapters: Vec<Chapter>,
    /// Amount charged for the bundle.
    pub total_price: Money,
    /// Undiscounted sum of the covered chapter prices.
    pub original_price: Money,
    pub discount_percent: i32,
}

/// Parameters for recording a multi-chapter purchase in the ledger.
#[derive(Debug, Clone)]
pub struct RecordBatchPurchaseParams {
    pub user_id: UserId,
    pub book_id: i32,
    /// Paid chapters being bought, each charged its list price.
    pub chapters: Vec<Chapter>,
    /// Amount charged for the batch; the sum of the chapter prices.
    pub total_price: Money,
}

#[derive(Debug, Clone)]
pub struct PaginatedChapterPurchases {
    pub purchases: Vec<ChapterPurchase>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedChapterPurchases {
    pub fn into_dto(self) -> crate::model::purchase::PaginatedChapterPurchasesDto {
        crate::model::purchase::PaginatedChapterPurchasesDto {
            purchases: self.purchases.into_iter().map(|p| p.into_dto()).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseSummary {
    pub chapter_count: u64,
    pub book_count: u64,
    pub total_spent: Money,
}

impl PurchaseSummary {
    pub fn into_dto(self) -> crate::model::purchase::PurchaseSummaryDto {
        crate::model::purchase::PurchaseSummaryDto {
            chapter_count: self.chapter_count,
            book_count: self.book_count,
            total_spent: self.total_spent.cents(),
            total_spent_display: self.total_spent.to_string(),
        }
    }
}

/// Bundle price for the chapters of a book a caller does not own yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPriceQuote {
    pub book_id: i32,
    pub original_price: Money,
    pub discounted_price: Money,
    pub discount_percent: i32,
    /// Chapters the quote covers.
    pub chapters: Vec<Chapter>,
}

impl BookPriceQuote {
    pub fn into_dto(self) -> crate::model::book::BookPriceDto {
        crate::model::book::BookPriceDto {
            book_id: self.book_id,
            original_price: self.original_price.cents(),
            discounted_price: self.discounted_price.cents(),
            discount_percent: self.discount_percent,
            chapter_count: self.chapters.len() as u64,
        }
    }
}
