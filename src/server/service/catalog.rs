use std::collections::HashSet;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{book::BookRepository, chapter::ChapterRepository, purchase::PurchaseLedger},
    error::{purchase::PurchaseError, AppError},
    model::{
        catalog::{BookCatalog, CatalogChapter},
        chapter::{Book, Chapter},
        context::OperationContext,
        user::UserId,
    },
};

/// Trial size used when the caller does not ask for one.
pub const DEFAULT_TRIAL_CHAPTERS: u64 = 10;

/// Largest trial a caller may ask for.
pub const MAX_TRIAL_CHAPTERS: u64 = 100;

pub struct CatalogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CatalogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a book's chapters annotated with which ones the caller owns.
    ///
    /// # Returns
    /// - `Ok(BookCatalog)` - Book with chapters in chapter order
    /// - `Err(PurchaseError::NotFound)` - Book does not exist
    pub async fn get_catalog(
        &self,
        ctx: &OperationContext,
        user_id: Option<UserId>,
        book_id: i32,
    ) -> Result<BookCatalog, AppError> {
        ctx.checkpoint()?;

        let book = self.get_book(book_id).await?;

        let chapters = ChapterRepository::new(self.db)
            .get_by_book_id(book.id)
            .await?;

        let owned: HashSet<i32> = match user_id {
            Some(user_id) => PurchaseLedger::new(self.db)
                .list_purchased_chapter_ids(user_id, book.id)
                .await?
                .into_iter()
                .collect(),
            None => HashSet::new(),
        };

        let chapters = chapters
            .into_iter()
            .map(|chapter| CatalogChapter {
                is_purchased: owned.contains(&chapter.id),
                chapter,
            })
            .collect();

        Ok(BookCatalog { book, chapters })
    }

    /// Gets the chapters offered as a trial read of a book.
    ///
    /// The trial is the book's first free chapters; when the book has fewer free
    /// chapters than requested, it is topped up with the earliest paid chapters.
    /// `count` defaults to [`DEFAULT_TRIAL_CHAPTERS`] and is capped at
    /// [`MAX_TRIAL_CHAPTERS`].
    ///
    /// # Returns
    /// - `Ok(Vec<Chapter>)` - Trial chapters in chapter order
    /// - `Err(PurchaseError::NotFound)` - Book does not exist
    pub async fn get_trial_chapters(
        &self,
        ctx: &OperationContext,
        book_id: i32,
        count: Option<u64>,
    ) -> Result<Vec<Chapter>, AppError> {
        ctx.checkpoint()?;

        let count = match count {
            Some(0) | None => DEFAULT_TRIAL_CHAPTERS,
            Some(count) => count.min(MAX_TRIAL_CHAPTERS),
        };

        let book = self.get_book(book_id).await?;
        let repo = ChapterRepository::new(self.db);

        let mut chapters = repo.get_free_by_book_id(book.id, count).await?;

        let missing = (count as usize).saturating_sub(chapters.len());
        if missing > 0 {
            let paid = repo.get_paid_by_book_id(book.id).await?;
            chapters.extend(paid.into_iter().take(missing));
        }

        chapters.sort_by_key(|c| c.chapter_num);

        Ok(chapters)
    }

    /// Gets a book's VIP chapters in chapter order.
    ///
    /// # Returns
    /// - `Ok(Vec<Chapter>)` - VIP chapters, possibly empty
    /// - `Err(PurchaseError::NotFound)` - Book does not exist
    pub async fn get_vip_chapters(
        &self,
        ctx: &OperationContext,
        book_id: i32,
    ) -> Result<Vec<Chapter>, AppError> {
        ctx.checkpoint()?;

        let book = self.get_book(book_id).await?;

        ChapterRepository::new(self.db)
            .get_vip_by_book_id(book.id)
            .await
    }

    async fn get_book(&self, book_id: i32) -> Result<Book, AppError> {
        BookRepository::new(self.db)
            .get_by_id(book_id)
            .await?
            .ok_or_else(|| PurchaseError::NotFound(format!("Book {} not found", book_id)).into())
    }
}
