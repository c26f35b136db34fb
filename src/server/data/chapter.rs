//! Chapter catalog repository.
//!
//! Read-only access to chapter metadata. Every row is validated through
//! `Chapter::from_entity`, so a free chapter stored with a price fails loudly instead
//! of leaking into pricing.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::server::{error::AppError, model::chapter::Chapter};

pub struct ChapterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChapterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a chapter by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Chapter))` - Chapter found
    /// - `Ok(None)` - No chapter with this ID
    /// - `Err(AppError::InternalErr)` - Stored chapter violates a pricing invariant
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Chapter>, AppError> {
        let entity = entity::prelude::Chapter::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Chapter::from_entity).transpose()?)
    }

    /// Gets all chapters of a book ordered by chapter number.
    pub async fn get_by_book_id(&self, book_id: i32) -> Result<Vec<Chapter>, AppError> {
        let entities = entity::prelude::Chapter::find()
            .filter(entity::chapter::Column::BookId.eq(book_id))
            .order_by_asc(entity::chapter::Column::ChapterNum)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(Chapter::from_entity)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Gets the non-free chapters of a book ordered by chapter number.
    pub async fn get_paid_by_book_id(&self, book_id: i32) -> Result<Vec<Chapter>, AppError> {
        let entities = entity::prelude::Chapter::find()
            .filter(entity::chapter::Column::BookId.eq(book_id))
            .filter(entity::chapter::Column::IsFree.eq(false))
            .order_by_asc(entity::chapter::Column::ChapterNum)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(Chapter::from_entity)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Gets the chapters with the given IDs ordered by book and chapter number.
    ///
    /// IDs with no chapter are simply absent from the result.
    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<Chapter>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Chapter::find()
            .filter(entity::chapter::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::chapter::Column::BookId)
            .order_by_asc(entity::chapter::Column::ChapterNum)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(Chapter::from_entity)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Gets up to `limit` of a book's free chapters ordered by chapter number.
    pub async fn get_free_by_book_id(&self, book_id: i32, limit: u64) -> Result<Vec<Chapter>, AppError> {
        let entities = entity::prelude::Chapter::find()
            .filter(entity::chapter::Column::BookId.eq(book_id))
            .filter(entity::chapter::Column::IsFree.eq(true))
            .order_by_asc(entity::chapter::Column::ChapterNum)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(Chapter::from_entity)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Gets a book's VIP chapters ordered by chapter number.
    pub async fn get_vip_by_book_id(&self, book_id: i32) -> Result<Vec<Chapter>, AppError> {
        let entities = entity::prelude::Chapter::find()
            .filter(entity::chapter::Column::BookId.eq(book_id))
            .filter(entity::chapter::Column::IsVip.eq(true))
            .order_by_asc(entity::chapter::Column::ChapterNum)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(Chapter::from_entity)
            .collect::<Result<Vec<_>, _>>()?)
    }
}
