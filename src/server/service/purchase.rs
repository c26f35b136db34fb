//! Purchase orchestrator.
//!
//! Sequences a purchase as: load and validate, price, debit the wallet, write the
//! ledger, then update the purchased-chapter cache and publish an event. The wallet
//! and the ledger are separate stores, so once the debit has succeeded any failure
//! before the ledger write commits (a store error, cancellation, or a passed
//! deadline) is compensated with a refund under the same reference before the error
//! is returned.
//!
//! Handlers run purchases through [`run_detached`]: a purchase that has debited the
//! wallet must reach either the ledger write or the refund, even when the client
//! disconnects and the request future is dropped.

use std::{collections::HashSet, future::Future};

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    cache::{PurchasedChapterCache, VipStatusStore},
    data::{
        book::BookRepository, chapter::ChapterRepository, purchase::PurchaseLedger, wallet::Wallet,
    },
    error::{purchase::PurchaseError, AppError},
    event::{EventBus, PurchaseEvent},
    model::{
        access::ChapterAccessInfo,
        chapter::Chapter,
        context::OperationContext,
        money::Money,
        purchase::{
            BookPriceQuote, BookPurchase, ChapterPurchase, ChapterPurchaseBatch,
            PaginatedChapterPurchases, PurchaseSummary, RecordBatchPurchaseParams,
            RecordBookPurchaseParams,
        },
        user::UserId,
    },
    service::{
        access::{decide, ChapterAccessResolver},
        pricing,
    },
};

/// Most chapters a single batch purchase may name.
pub const MAX_BATCH_CHAPTERS: usize = 100;

/// Runs a purchase on its own task and waits for the result.
///
/// Dropping the returned future does not stop the purchase; the task runs to
/// completion and the purchase only stops early through its `OperationContext`.
///
/// # Returns
/// - The purchase's own result
/// - `Err(AppError::InternalError)` - The purchase task panicked
pub async fn run_detached<F, T>(purchase: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(purchase)
        .await
        .map_err(|e| AppError::InternalError(format!("Purchase task failed: {}", e)))?
}

pub struct PurchaseService<'a> {
    db: &'a DatabaseConnection,
    wallet: &'a dyn Wallet,
    vip_store: &'a dyn VipStatusStore,
    purchase_cache: &'a dyn PurchasedChapterCache,
    events: &'a EventBus,
    discount_percent: i32,
}

impl<'a> PurchaseService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        wallet: &'a dyn Wallet,
        vip_store: &'a dyn VipStatusStore,
        purchase_cache: &'a dyn PurchasedChapterCache,
        events: &'a EventBus,
        discount_percent: i32,
    ) -> Self {
        Self {
            db,
            wallet,
            vip_store,
            purchase_cache,
            events,
            discount_percent,
        }
    }

    fn resolver(&self) -> ChapterAccessResolver<'_> {
        ChapterAccessResolver::new(self.db, self.vip_store, self.purchase_cache)
    }

    async fn get_chapter(&self, chapter_id: i32) -> Result<Chapter, AppError> {
        ChapterRepository::new(self.db)
            .get_by_id(chapter_id)
            .await?
            .ok_or_else(|| PurchaseError::NotFound(format!("Chapter {} not found", chapter_id)).into())
    }

    /// Gets a chapter and the price of buying it.
    pub async fn get_chapter_price(
        &self,
        ctx: &OperationContext,
        chapter_id: i32,
    ) -> Result<(Chapter, Money), AppError> {
        ctx.checkpoint()?;

        let chapter = self.get_chapter(chapter_id).await?;
        let price = pricing::chapter_price(&chapter);

        Ok((chapter, price))
    }

    /// Resolves access to a chapter for display, including ownership details.
    ///
    /// A locked chapter is a successful result with `can_access == false`.
    ///
    /// # Returns
    /// - `Ok(ChapterAccessInfo)` - Verdict with reason, price and purchase details
    /// - `Err(PurchaseError::NotFound)` - Chapter does not exist
    pub async fn check_access(
        &self,
        ctx: &OperationContext,
        user_id: Option<UserId>,
        chapter_id: i32,
    ) -> Result<ChapterAccessInfo, AppError> {
        ctx.checkpoint()?;

        let chapter = self.get_chapter(chapter_id).await?;
        let resolver = self.resolver();
        let facts = resolver.facts(ctx, user_id, &chapter).await?;
        let reason = decide(&chapter, facts);

        let purchased_at = match user_id {
            Some(user_id) if facts.has_purchased => PurchaseLedger::new(self.db)
                .find_chapter_purchase(user_id, chapter.id)
                .await?
                .map(|p| p.purchased_at),
            _ => None,
        };

        Ok(ChapterAccessInfo {
            chapter,
            is_purchased: facts.has_purchased,
            purchased_at,
            can_access: reason.grants_access(),
            reason,
        })
    }

    /// Buys a single chapter.
    ///
    /// # Returns
    /// - `Ok(ChapterPurchase)` - Ledger record of the purchase
    /// - `Err(PurchaseError::NotFound)` - Chapter does not exist
    /// - `Err(PurchaseError::FreeChapter)` - Chapter is free
    /// - `Err(PurchaseError::AlreadyPurchased)` - User already owns the chapter
    /// - `Err(PurchaseError::InsufficientBalance)` - Wallet refused the debit
    /// - `Err(PurchaseError::Cancelled | DeadlineExceeded)` - Stopped; any debit was refunded
    pub async fn purchase_chapter(
        &self,
        ctx: &OperationContext,
        user_id: UserId,
        chapter_id: i32,
    ) -> Result<ChapterPurchase, AppError> {
        ctx.checkpoint()?;

        let chapter = ctx.bounded(self.get_chapter(chapter_id)).await?;

        if chapter.is_free {
            return Err(PurchaseError::FreeChapter.into());
        }

        let ledger = PurchaseLedger::new(self.db);
        if ctx
            .bounded(ledger.has_purchased_chapter(user_id, chapter.id))
            .await?
        {
            return Err(PurchaseError::AlreadyPurchased.into());
        }

        let price = pricing::chapter_price(&chapter);
        let reference = format!("chapter:{}:{}:{}", user_id, chapter.id, Uuid::new_v4());

        ctx.checkpoint()?;
        self.debit(user_id, price, &reference).await?;

        let recorded = match ctx.checkpoint() {
            Ok(()) => ledger.record_chapter_purchase(user_id, &chapter, price).await,
            Err(e) => Err(e.into()),
        };

        let purchase = match recorded {
            Ok(purchase) => purchase,
            Err(err) => {
                self.compensate(user_id, price, &reference, &err).await;
                return Err(err);
            }
        };

        self.remember_purchased(user_id, &[chapter.id]).await;
        self.events.publish(PurchaseEvent::ChapterPurchased {
            user_id,
            chapter_id: chapter.id,
            book_id: chapter.book_id,
            price,
        });

        tracing::info!(
            "User {} purchased chapter {} of book {} for {}",
            user_id,
            chapter.id,
            chapter.book_id,
            price
        );

        Ok(purchase)
    }

    /// Quotes the bundle price of the paid chapters in a book the caller does not own.
    ///
    /// Anonymous callers are quoted every paid chapter.
    pub async fn calculate_book_price(
        &self,
        ctx: &OperationContext,
        user_id: Option<UserId>,
        book_id: i32,
    ) -> Result<BookPriceQuote, AppError> {
        ctx.checkpoint()?;

        let book = BookRepository::new(self.db)
            .get_by_id(book_id)
            .await?
            .ok_or_else(|| PurchaseError::NotFound(format!("Book {} not found", book_id)))?;

        let mut chapters = ChapterRepository::new(self.db)
            .get_paid_by_book_id(book.id)
            .await?;

        if let Some(user_id) = user_id {
            let owned: HashSet<i32> = PurchaseLedger::new(self.db)
                .list_purchased_chapter_ids(user_id, book.id)
                .await?
                .into_iter()
                .collect();
            chapters.retain(|c| !owned.contains(&c.id));
        }

        let original_price = pricing::paid_total(&chapters)?;
        let discounted_price = pricing::book_bundle_price(&chapters, self.discount_percent)?;

        Ok(BookPriceQuote {
            book_id: book.id,
            original_price,
            discounted_price,
            discount_percent: self.discount_percent,
            chapters,
        })
    }

    /// Buys every remaining paid chapter of a book as one discounted bundle.
    ///
    /// Chapters the user already bought individually are excluded from both the price
    /// and the bundle. Chapters published later are not covered.
    ///
    /// # Returns
    /// - `Ok(BookPurchase)` - Ledger record of the bundle
    /// - `Err(PurchaseError::NotFound)` - Book does not exist
    /// - `Err(PurchaseError::AlreadyPurchased)` - User already bought this book
    /// - `Err(PurchaseError::NoPaidChapters)` - Nothing left to buy
    /// - `Err(PurchaseError::InsufficientBalance)` - Wallet refused the debit
    /// - `Err(PurchaseError::Cancelled | DeadlineExceeded)` - Stopped; any debit was refunded
    pub async fn purchase_book(
        &self,
        ctx: &OperationContext,
        user_id: UserId,
        book_id: i32,
    ) -> Result<BookPurchase, AppError> {
        ctx.checkpoint()?;

        let ledger = PurchaseLedger::new(self.db);
        let quote = ctx
            .bounded(self.calculate_book_price(ctx, Some(user_id), book_id))
            .await?;

        if ctx
            .bounded(ledger.has_purchased_book(user_id, book_id))
            .await?
        {
            return Err(PurchaseError::AlreadyPurchased.into());
        }

        if quote.chapters.is_empty() {
            return Err(PurchaseError::NoPaidChapters.into());
        }

        let price = quote.discounted_price;
        let reference = format!("book:{}:{}:{}", user_id, book_id, Uuid::new_v4());

        ctx.checkpoint()?;
        self.debit(user_id, price, &reference).await?;

        let params = RecordBookPurchaseParams {
            user_id,
            book_id,
            chapters: quote.chapters,
            total_price: price,
            original_price: quote.original_price,
            discount_percent: quote.discount_percent,
        };

        let recorded = match ctx.checkpoint() {
            Ok(()) => ledger.record_book_purchase(params).await,
            Err(e) => Err(e.into()),
        };

        let (book_purchase, chapter_purchases) = match recorded {
            Ok(recorded) => recorded,
            Err(err) => {
                self.compensate(user_id, price, &reference, &err).await;
                return Err(err);
            }
        };

        let chapter_ids: Vec<i32> = chapter_purchases.iter().map(|p| p.chapter_id).collect();
        self.remember_purchased(user_id, &chapter_ids).await;
        self.events.publish(PurchaseEvent::BookPurchased {
            user_id,
            book_id,
            chapter_count: chapter_ids.len(),
            total_price: price,
        });

        tracing::info!(
            "User {} purchased book {} ({} chapters) for {}",
            user_id,
            book_id,
            chapter_ids.len(),
            price
        );

        Ok(book_purchase)
    }

    /// Buys a selection of chapters from one book in a single debit.
    ///
    /// Free chapters and chapters the user already owns are skipped; the rest are
    /// charged their list prices. Duplicate IDs count once.
    ///
    /// # Returns
    /// - `Ok(ChapterPurchaseBatch)` - Batch record with one purchase per chapter bought
    /// - `Err(PurchaseError::InvalidSelection)` - Empty or oversized selection, or
    ///   chapters from more than one book
    /// - `Err(PurchaseError::NotFound)` - A named chapter does not exist
    /// - `Err(PurchaseError::NoPaidChapters)` - Nothing left to buy after skipping
    /// - `Err(PurchaseError::AlreadyPurchased)` - A chapter was bought concurrently
    /// - `Err(PurchaseError::InsufficientBalance)` - Wallet refused the debit
    /// - `Err(PurchaseError::Cancelled | DeadlineExceeded)` - Stopped; any debit was refunded
    pub async fn purchase_chapters(
        &self,
        ctx: &OperationContext,
        user_id: UserId,
        chapter_ids: &[i32],
    ) -> Result<ChapterPurchaseBatch, AppError> {
        ctx.checkpoint()?;

        let mut requested = Vec::with_capacity(chapter_ids.len());
        let mut seen = HashSet::new();
        for id in chapter_ids {
            if seen.insert(*id) {
                requested.push(*id);
            }
        }

        if requested.is_empty() {
            return Err(PurchaseError::InvalidSelection("no chapters selected".to_string()).into());
        }
        if requested.len() > MAX_BATCH_CHAPTERS {
            return Err(PurchaseError::InvalidSelection(format!(
                "at most {} chapters can be bought at once",
                MAX_BATCH_CHAPTERS
            ))
            .into());
        }

        let chapters = ctx
            .bounded(ChapterRepository::new(self.db).get_by_ids(&requested))
            .await?;

        if let Some(missing) = requested
            .iter()
            .find(|id| !chapters.iter().any(|c| c.id == **id))
        {
            return Err(PurchaseError::NotFound(format!("Chapter {} not found", missing)).into());
        }

        let book_id = chapters[0].book_id;
        if chapters.iter().any(|c| c.book_id != book_id) {
            return Err(PurchaseError::InvalidSelection(
                "chapters must belong to the same book".to_string(),
            )
            .into());
        }

        let ledger = PurchaseLedger::new(self.db);
        let owned: HashSet<i32> = ctx
            .bounded(ledger.list_purchased_chapter_ids(user_id, book_id))
            .await?
            .into_iter()
            .collect();

        let to_buy: Vec<Chapter> = chapters
            .into_iter()
            .filter(|c| c.is_paid() && !owned.contains(&c.id))
            .collect();

        if to_buy.is_empty() {
            return Err(PurchaseError::NoPaidChapters.into());
        }

        let price = pricing::paid_total(&to_buy)?;
        let reference = format!("batch:{}:{}:{}", user_id, book_id, Uuid::new_v4());

        ctx.checkpoint()?;
        self.debit(user_id, price, &reference).await?;

        let params = RecordBatchPurchaseParams {
            user_id,
            book_id,
            chapters: to_buy,
            total_price: price,
        };

        let recorded = match ctx.checkpoint() {
            Ok(()) => ledger.record_batch_purchase(params).await,
            Err(e) => Err(e.into()),
        };

        let batch = match recorded {
            Ok(batch) => batch,
            Err(err) => {
                self.compensate(user_id, price, &reference, &err).await;
                return Err(err);
            }
        };

        let chapter_ids = batch.chapter_ids();
        self.remember_purchased(user_id, &chapter_ids).await;

        tracing::info!(
            "User {} purchased {} chapters of book {} for {}",
            user_id,
            chapter_ids.len(),
            book_id,
            price
        );

        self.events.publish(PurchaseEvent::ChaptersPurchased {
            user_id,
            book_id,
            chapter_ids,
            total_price: price,
        });

        Ok(batch)
    }

    /// Gets a page of the user's chapter purchases, newest first.
    pub async fn get_chapter_purchases(
        &self,
        ctx: &OperationContext,
        user_id: UserId,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedChapterPurchases, AppError> {
        ctx.checkpoint()?;

        let (purchases, total) = PurchaseLedger::new(self.db)
            .list_purchases(user_id, page, per_page)
            .await?;

        Ok(paginated(purchases, total, page, per_page))
    }

    /// Gets a page of the user's chapter purchases within one book.
    pub async fn get_book_purchases(
        &self,
        ctx: &OperationContext,
        user_id: UserId,
        book_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedChapterPurchases, AppError> {
        ctx.checkpoint()?;

        let (purchases, total) = PurchaseLedger::new(self.db)
            .list_book_purchases(user_id, book_id, page, per_page)
            .await?;

        Ok(paginated(purchases, total, page, per_page))
    }

    pub async fn get_purchased_chapter_ids(
        &self,
        ctx: &OperationContext,
        user_id: UserId,
        book_id: i32,
    ) -> Result<Vec<i32>, AppError> {
        ctx.checkpoint()?;

        PurchaseLedger::new(self.db)
            .list_purchased_chapter_ids(user_id, book_id)
            .await
    }

    pub async fn get_purchase_summary(
        &self,
        ctx: &OperationContext,
        user_id: UserId,
    ) -> Result<PurchaseSummary, AppError> {
        ctx.checkpoint()?;

        PurchaseLedger::new(self.db).summary(user_id).await
    }

    /// Debits the wallet; zero amounts never touch it.
    async fn debit(&self, user_id: UserId, amount: Money, reference: &str) -> Result<(), AppError> {
        if amount.is_zero() {
            return Ok(());
        }

        self.wallet.debit(user_id, amount, reference).await
    }

    /// Refunds a debit whose purchase did not complete.
    ///
    /// Runs regardless of cancellation. A failed refund is logged; the caller still
    /// returns the error that caused the compensation.
    async fn compensate(&self, user_id: UserId, amount: Money, reference: &str, cause: &AppError) {
        if amount.is_zero() {
            return;
        }

        match self.wallet.refund(user_id, amount, reference).await {
            Ok(()) => tracing::warn!(
                "Refunded {} to user {} after failed purchase {}: {}",
                amount,
                user_id,
                reference,
                cause
            ),
            Err(refund_err) => tracing::error!(
                "Failed to refund {} to user {} for purchase {} after error '{}': {}",
                amount,
                user_id,
                reference,
                cause,
                refund_err
            ),
        }
    }

    async fn remember_purchased(&self, user_id: UserId, chapter_ids: &[i32]) {
        if let Err(e) = self.purchase_cache.add(user_id, chapter_ids).await {
            tracing::warn!("Failed to update purchased-chapter cache for user {}: {}", user_id, e);
        }
    }
}

fn paginated(
    purchases: Vec<ChapterPurchase>,
    total: u64,
    page: u64,
    per_page: u64,
) -> PaginatedChapterPurchases {
    let total_pages = if per_page > 0 {
        total.div_ceil(per_page)
    } else {
        0
    };

    PaginatedChapterPurchases {
        purchases,
        total,
        page,
        per_page,
        total_pages,
    }
}
