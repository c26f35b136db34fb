//! Chapter access resolver.
//!
//! Access is decided by [`decide`], a pure function of the chapter and two facts about
//! the caller: whether they are VIP and whether they purchased the chapter. The
//! resolver gathers those facts from the VIP store and the purchase ledger on every
//! call; nothing is remembered between requests.

use sea_orm::DatabaseConnection;

use crate::server::{
    cache::{PurchasedChapterCache, VipStatusStore},
    data::purchase::PurchaseLedger,
    error::AppError,
    model::{
        access::{AccessFacts, AccessReason},
        chapter::Chapter,
        context::OperationContext,
        user::UserId,
    },
};

/// Decides access for a chapter in strict precedence order.
///
/// 1. free chapters are open to everyone
/// 2. a purchased non-VIP chapter is open
/// 3. a VIP chapter is open to VIP users
/// 4. any purchased chapter is open
/// 5. everything else is locked
pub fn decide(chapter: &Chapter, facts: AccessFacts) -> AccessReason {
    if chapter.is_free {
        AccessReason::Free
    } else if !chapter.is_vip && facts.has_purchased {
        AccessReason::Purchased
    } else if chapter.is_vip && facts.is_vip {
        AccessReason::Vip
    } else if facts.has_purchased {
        AccessReason::Purchased
    } else {
        AccessReason::Locked
    }
}

pub struct ChapterAccessResolver<'a> {
    db: &'a DatabaseConnection,
    vip_store: &'a dyn VipStatusStore,
    purchase_cache: &'a dyn PurchasedChapterCache,
}

impl<'a> ChapterAccessResolver<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        vip_store: &'a dyn VipStatusStore,
        purchase_cache: &'a dyn PurchasedChapterCache,
    ) -> Self {
        Self {
            db,
            vip_store,
            purchase_cache,
        }
    }

    /// Looks up the facts an access decision depends on.
    ///
    /// Free chapters and anonymous callers need no store access. The VIP store is only
    /// consulted for VIP chapters.
    pub async fn facts(
        &self,
        ctx: &OperationContext,
        user_id: Option<UserId>,
        chapter: &Chapter,
    ) -> Result<AccessFacts, AppError> {
        let Some(user_id) = user_id else {
            return Ok(AccessFacts::default());
        };

        if chapter.is_free {
            return Ok(AccessFacts::default());
        }

        ctx.checkpoint()?;

        let is_vip = if chapter.is_vip {
            self.vip_store.is_vip(user_id).await?
        } else {
            false
        };

        let has_purchased = self.has_purchased(user_id, chapter.id).await?;

        Ok(AccessFacts {
            is_vip,
            has_purchased,
        })
    }

    /// Whether the user owns the chapter.
    ///
    /// Checks the purchased-chapter cache first. On a miss or a cache failure the ledger
    /// answers, and a ledger hit is written back to the cache.
    pub async fn has_purchased(&self, user_id: UserId, chapter_id: i32) -> Result<bool, AppError> {
        match self.purchase_cache.contains(user_id, chapter_id).await {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(
                    "Purchased-chapter cache lookup failed for user {}, falling back to ledger: {}",
                    user_id,
                    e
                );
            }
        }

        let purchased = PurchaseLedger::new(self.db)
            .has_purchased_chapter(user_id, chapter_id)
            .await?;

        if purchased {
            if let Err(e) = self.purchase_cache.add(user_id, &[chapter_id]).await {
                tracing::warn!("Failed to backfill purchased-chapter cache for user {}: {}", user_id, e);
            }
        }

        Ok(purchased)
    }
}
