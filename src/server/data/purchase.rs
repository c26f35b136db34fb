//! Purchase ledger.
//!
//! Persisted record of chapter and book purchases. The unique indexes on
//! `(user_id, chapter_id)` and `(user_id, book_id)` are the sole source of
//! at-most-once semantics: concurrent writers race on the insert and the loser gets
//! `PurchaseError::AlreadyPurchased`. Bundle and batch purchases write their parent
//! row and all chapter rows in one transaction so a partial purchase can never be
//! observed.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::server::{
    data::is_unique_violation,
    error::{purchase::PurchaseError, AppError},
    model::{
        chapter::Chapter,
        money::Money,
        purchase::{
            BookPurchase, ChapterPurchase, ChapterPurchaseBatch, PurchaseSummary,
            RecordBatchPurchaseParams, RecordBookPurchaseParams,
        },
        user::UserId,
    },
    service::pricing::allocate_bundle,
};

pub struct PurchaseLedger<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PurchaseLedger<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn has_purchased_chapter(
        &self,
        user_id: UserId,
        chapter_id: i32,
    ) -> Result<bool, AppError> {
        let count = entity::prelude::ChapterPurchase::find()
            .filter(entity::chapter_purchase::Column::UserId.eq(user_id.as_i64()))
            .filter(entity::chapter_purchase::Column::ChapterId.eq(chapter_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets the purchase record for a (user, chapter) pair.
    pub async fn find_chapter_purchase(
        &self,
        user_id: UserId,
        chapter_id: i32,
    ) -> Result<Option<ChapterPurchase>, AppError> {
        let entity = entity::prelude::ChapterPurchase::find()
            .filter(entity::chapter_purchase::Column::UserId.eq(user_id.as_i64()))
            .filter(entity::chapter_purchase::Column::ChapterId.eq(chapter_id))
            .one(self.db)
            .await?;

        Ok(entity.map(ChapterPurchase::from_entity).transpose()?)
    }

    /// Records a single chapter purchase.
    ///
    /// # Returns
    /// - `Ok(ChapterPurchase)` - Newly created record
    /// - `Err(PurchaseError::AlreadyPurchased)` - A record for this pair already exists
    /// - `Err(AppError::DbErr)` - Any other database failure
    pub async fn record_chapter_purchase(
        &self,
        user_id: UserId,
        chapter: &Chapter,
        price: Money,
    ) -> Result<ChapterPurchase, AppError> {
        let entity = entity::chapter_purchase::ActiveModel {
            user_id: ActiveValue::Set(user_id.as_i64()),
            chapter_id: ActiveValue::Set(chapter.id),
            book_id: ActiveValue::Set(chapter.book_id),
            price: ActiveValue::Set(price.cents()),
            book_purchase_id: ActiveValue::Set(None),
            batch_id: ActiveValue::Set(None),
            purchased_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
        .map_err(already_purchased_on_conflict)?;

        Ok(ChapterPurchase::from_entity(entity)?)
    }

    pub async fn has_purchased_book(&self, user_id: UserId, book_id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::BookPurchase::find()
            .filter(entity::book_purchase::Column::UserId.eq(user_id.as_i64()))
            .filter(entity::book_purchase::Column::BookId.eq(book_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Records a bundle purchase and one chapter purchase per paid chapter in it.
    ///
    /// The bundle total is split across the chapters proportionally to their list
    /// prices; the chapter rows always sum to `total_price` exactly. Either every row
    /// is written or none is.
    ///
    /// # Returns
    /// - `Ok((BookPurchase, Vec<ChapterPurchase>))` - The bundle and its chapter rows
    /// - `Err(PurchaseError::AlreadyPurchased)` - The user already bought this book, or
    ///   one of the chapters individually
    /// - `Err(AppError::DbErr)` - Any other database failure; nothing was written
    pub async fn record_book_purchase(
        &self,
        params: RecordBookPurchaseParams,
    ) -> Result<(BookPurchase, Vec<ChapterPurchase>), AppError> {
        let paid: Vec<&Chapter> = params.chapters.iter().filter(|c| c.is_paid()).collect();
        let prices: Vec<Money> = paid.iter().map(|c| c.price).collect();
        let shares = allocate_bundle(&prices, params.total_price)?;
        let now = Utc::now();

        let txn = self.db.begin().await?;

        let book_purchase = entity::book_purchase::ActiveModel {
            user_id: ActiveValue::Set(params.user_id.as_i64()),
            book_id: ActiveValue::Set(params.book_id),
            total_price: ActiveValue::Set(params.total_price.cents()),
            original_price: ActiveValue::Set(params.original_price.cents()),
            discount_percent: ActiveValue::Set(params.discount_percent),
            chapter_count: ActiveValue::Set(paid.len() as i32),
            purchased_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(already_purchased_on_conflict)?;

        let mut chapter_purchases = Vec::with_capacity(paid.len());
        for (chapter, share) in paid.into_iter().zip(shares) {
            let entity = entity::chapter_purchase::ActiveModel {
                user_id: ActiveValue::Set(params.user_id.as_i64()),
                chapter_id: ActiveValue::Set(chapter.id),
                book_id: ActiveValue::Set(chapter.book_id),
                price: ActiveValue::Set(share.cents()),
                book_purchase_id: ActiveValue::Set(Some(book_purchase.id)),
                batch_id: ActiveValue::Set(None),
                purchased_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(already_purchased_on_conflict)?;

            chapter_purchases.push(ChapterPurchase::from_entity(entity)?);
        }

        txn.commit().await?;

        Ok((BookPurchase::from_entity(book_purchase)?, chapter_purchases))
    }

    /// Records several chapters bought together, each at its list price.
    ///
    /// Writes one batch row and one chapter row per chapter in a single transaction.
    ///
    /// # Returns
    /// - `Ok(ChapterPurchaseBatch)` - The batch with its chapter rows
    /// - `Err(PurchaseError::AlreadyPurchased)` - The user already owns one of the chapters
    /// - `Err(AppError::DbErr)` - Any other database failure; nothing was written
    pub async fn record_batch_purchase(
        &self,
        params: RecordBatchPurchaseParams,
    ) -> Result<ChapterPurchaseBatch, AppError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let batch = entity::chapter_purchase_batch::ActiveModel {
            user_id: ActiveValue::Set(params.user_id.as_i64()),
            book_id: ActiveValue::Set(params.book_id),
            total_price: ActiveValue::Set(params.total_price.cents()),
            chapter_count: ActiveValue::Set(params.chapters.len() as i32),
            purchased_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut purchases = Vec::with_capacity(params.chapters.len());
        for chapter in &params.chapters {
            let entity = entity::chapter_purchase::ActiveModel {
                user_id: ActiveValue::Set(params.user_id.as_i64()),
                chapter_id: ActiveValue::Set(chapter.id),
                book_id: ActiveValue::Set(chapter.book_id),
                price: ActiveValue::Set(chapter.price.cents()),
                book_purchase_id: ActiveValue::Set(None),
                batch_id: ActiveValue::Set(Some(batch.id)),
                purchased_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(already_purchased_on_conflict)?;

            purchases.push(ChapterPurchase::from_entity(entity)?);
        }

        txn.commit().await?;

        Ok(ChapterPurchaseBatch::from_entity(batch, purchases)?)
    }

    /// Gets the IDs of chapters in a book the user owns, ascending.
    pub async fn list_purchased_chapter_ids(
        &self,
        user_id: UserId,
        book_id: i32,
    ) -> Result<Vec<i32>, AppError> {
        let ids = entity::prelude::ChapterPurchase::find()
            .select_only()
            .column(entity::chapter_purchase::Column::ChapterId)
            .filter(entity::chapter_purchase::Column::UserId.eq(user_id.as_i64()))
            .filter(entity::chapter_purchase::Column::BookId.eq(book_id))
            .order_by_asc(entity::chapter_purchase::Column::ChapterId)
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        Ok(ids)
    }

    /// Gets a page of the user's chapter purchases, newest first.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Records per page
    ///
    /// # Returns
    /// - `Ok((purchases, total))` - Records for the page and total record count
    pub async fn list_purchases(
        &self,
        user_id: UserId,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ChapterPurchase>, u64), AppError> {
        let paginator = entity::prelude::ChapterPurchase::find()
            .filter(entity::chapter_purchase::Column::UserId.eq(user_id.as_i64()))
            .order_by_desc(entity::chapter_purchase::Column::PurchasedAt)
            .order_by_desc(entity::chapter_purchase::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        let purchases = entities
            .into_iter()
            .map(ChapterPurchase::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((purchases, total))
    }

    /// Gets a page of the user's chapter purchases within one book, by chapter ID.
    pub async fn list_book_purchases(
        &self,
        user_id: UserId,
        book_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ChapterPurchase>, u64), AppError> {
        let paginator = entity::prelude::ChapterPurchase::find()
            .filter(entity::chapter_purchase::Column::UserId.eq(user_id.as_i64()))
            .filter(entity::chapter_purchase::Column::BookId.eq(book_id))
            .order_by_asc(entity::chapter_purchase::Column::ChapterId)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        let purchases = entities
            .into_iter()
            .map(ChapterPurchase::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((purchases, total))
    }

    /// Counts the user's purchases and totals what they spent on chapters.
    pub async fn summary(&self, user_id: UserId) -> Result<PurchaseSummary, AppError> {
        let prices = entity::prelude::ChapterPurchase::find()
            .select_only()
            .column(entity::chapter_purchase::Column::Price)
            .filter(entity::chapter_purchase::Column::UserId.eq(user_id.as_i64()))
            .into_tuple::<i64>()
            .all(self.db)
            .await?;

        let book_count = entity::prelude::BookPurchase::find()
            .filter(entity::book_purchase::Column::UserId.eq(user_id.as_i64()))
            .count(self.db)
            .await?;

        let amounts = prices
            .iter()
            .map(|cents| Money::from_cents(*cents))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PurchaseSummary {
            chapter_count: prices.len() as u64,
            book_count,
            total_spent: Money::checked_sum(amounts)?,
        })
    }
}

fn already_purchased_on_conflict(err: DbErr) -> AppError {
    if is_unique_violation(&err) {
        PurchaseError::AlreadyPurchased.into()
    } else {
        err.into()
    }
}
