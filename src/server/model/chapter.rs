//! Catalog domain models.
//!
//! Chapters and books are owned by the catalog and read-only to the purchase flow.
//! Entity rows are validated on conversion so the rest of the service can rely on
//! the free-chapter pricing invariant and on well-formed amounts and ratings.

use crate::server::{
    error::internal::InternalError,
    model::{money::Money, rating::Rating},
};

/// Chapter metadata consumed by pricing, access control and purchasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: i32,
    pub book_id: i32,
    pub chapter_num: i32,
    pub title: String,
    pub is_free: bool,
    pub is_vip: bool,
    /// List price. Always zero for free chapters.
    pub price: Money,
    pub word_count: i32,
}

impl Chapter {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Chapter)` - Valid chapter
    /// - `Err(InternalError::InvalidStoredValue)` - Stored price is negative
    /// - `Err(InternalError::FreeChapterPriced)` - Free chapter stored with a non-zero price
    pub fn from_entity(entity: entity::chapter::Model) -> Result<Self, InternalError> {
        let price =
            Money::from_cents(entity.price).map_err(|e| InternalError::InvalidStoredValue {
                record: format!("chapter {}", entity.id),
                field: "price",
                reason: e.to_string(),
            })?;

        if entity.is_free && !price.is_zero() {
            return Err(InternalError::FreeChapterPriced {
                chapter_id: entity.id,
                price: entity.price,
            });
        }

        Ok(Self {
            id: entity.id,
            book_id: entity.book_id,
            chapter_num: entity.chapter_num,
            title: entity.title,
            is_free: entity.is_free,
            is_vip: entity.is_vip,
            price,
            word_count: entity.word_count,
        })
    }

    /// Whether the chapter must be bought (or unlocked through VIP) before reading.
    pub fn is_paid(&self) -> bool {
        !self.is_free
    }

    pub fn into_summary_dto(self) -> crate::model::chapter::ChapterSummaryDto {
        crate::model::chapter::ChapterSummaryDto {
            id: self.id,
            chapter_num: self.chapter_num,
            title: self.title,
            word_count: self.word_count,
            is_free: self.is_free,
            is_vip: self.is_vip,
            price: self.price.cents(),
        }
    }

    /// Converts to a price DTO carrying the effective purchase price.
    pub fn into_price_dto(self, price: Money) -> crate::model::chapter::ChapterPriceDto {
        crate::model::chapter::ChapterPriceDto {
            chapter_id: self.id,
            book_id: self.book_id,
            is_free: self.is_free,
            is_vip: self.is_vip,
            price: price.cents(),
            price_display: price.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub rating: Option<Rating>,
}

impl Book {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Book)` - Valid book
    /// - `Err(InternalError::InvalidStoredValue)` - Stored rating outside 0.0 - 5.0
    pub fn from_entity(entity: entity::book::Model) -> Result<Self, InternalError> {
        let rating = entity
            .rating
            .map(Rating::new)
            .transpose()
            .map_err(|e| InternalError::InvalidStoredValue {
                record: format!("book {}", entity.id),
                field: "rating",
                reason: e.to_string(),
            })?;

        Ok(Self {
            id: entity.id,
            title: entity.title,
            author: entity.author,
            rating,
        })
    }
}
