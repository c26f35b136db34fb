//! In-process VIP status store and purchased-chapter cache.
//!
//! Used when no Redis URL is configured and in tests. State lives for the lifetime
//! of the process and is not shared between instances.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tokio::sync::RwLock;

use crate::server::{
    cache::{PurchasedChapterCache, VipStatusStore},
    error::AppError,
    model::user::UserId,
};

/// VIP records keyed by user, each carrying its own expiry.
///
/// Expired records are treated as absent on read and dropped on the next write.
#[derive(Clone, Default)]
pub struct MemoryCacheStore {
    vip: Arc<RwLock<HashMap<UserId, DateTime<Utc>>>>,
    purchased: Arc<RwLock<HashMap<UserId, HashSet<i32>>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VipStatusStore for MemoryCacheStore {
    async fn is_vip(&self, user_id: UserId) -> Result<bool, AppError> {
        Ok(self.expires_at(user_id).await?.is_some())
    }

    async fn grant(&self, user_id: UserId, duration: Duration) -> Result<DateTime<Utc>, AppError> {
        let now = Utc::now();
        let expires_at = now + duration;

        let mut vip = self.vip.write().await;
        vip.retain(|_, expiry| *expiry > now);
        vip.insert(user_id, expires_at);

        Ok(expires_at)
    }

    async fn revoke(&self, user_id: UserId) -> Result<(), AppError> {
        self.vip.write().await.remove(&user_id);

        Ok(())
    }

    async fn expires_at(&self, user_id: UserId) -> Result<Option<DateTime<Utc>>, AppError> {
        let vip = self.vip.read().await;

        Ok(vip
            .get(&user_id)
            .copied()
            .filter(|expiry| *expiry > Utc::now()))
    }
}

#[async_trait]
impl PurchasedChapterCache for MemoryCacheStore {
    async fn contains(&self, user_id: UserId, chapter_id: i32) -> Result<bool, AppError> {
        let purchased = self.purchased.read().await;

        Ok(purchased
            .get(&user_id)
            .is_some_and(|chapters| chapters.contains(&chapter_id)))
    }

    async fn add(&self, user_id: UserId, chapter_ids: &[i32]) -> Result<(), AppError> {
        if chapter_ids.is_empty() {
            return Ok(());
        }

        self.purchased
            .write()
            .await
            .entry(user_id)
            .or_default()
            .extend(chapter_ids.iter().copied());

        Ok(())
    }
}
