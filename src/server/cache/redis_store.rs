use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use redis::{aio::ConnectionManager, AsyncCommands};

use crate::server::{
    cache::{purchased_chapters_key, ttl_seconds, vip_status_key, PurchasedChapterCache, VipStatusStore},
    error::AppError,
    model::user::UserId,
};

/// How long a purchased-chapter set lives after its last update.
const PURCHASE_CACHE_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Redis-backed VIP status store and purchased-chapter cache.
///
/// The VIP key stores the expiry as a unix timestamp and carries a matching TTL, so
/// Redis removes it on expiry. `ConnectionManager` reconnects on failure and is
/// cloned per command.
#[derive(Clone)]
pub struct RedisCacheStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisCacheStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl VipStatusStore for RedisCacheStore {
    async fn is_vip(&self, user_id: UserId) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(vip_status_key(&self.prefix, user_id)).await?;

        Ok(exists)
    }

    async fn grant(&self, user_id: UserId, duration: Duration) -> Result<DateTime<Utc>, AppError> {
        let mut conn = self.conn.clone();
        let expires_at = Utc::now() + duration;

        let _: () = conn
            .set_ex(
                vip_status_key(&self.prefix, user_id),
                expires_at.timestamp(),
                ttl_seconds(duration),
            )
            .await?;

        Ok(expires_at)
    }

    async fn revoke(&self, user_id: UserId) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(vip_status_key(&self.prefix, user_id)).await?;

        Ok(())
    }

    async fn expires_at(&self, user_id: UserId) -> Result<Option<DateTime<Utc>>, AppError> {
        let mut conn = self.conn.clone();
        let timestamp: Option<i64> = conn.get(vip_status_key(&self.prefix, user_id)).await?;

        Ok(timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)))
    }
}

#[async_trait]
impl PurchasedChapterCache for RedisCacheStore {
    async fn contains(&self, user_id: UserId, chapter_id: i32) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let member: bool = conn
            .sismember(purchased_chapters_key(&self.prefix, user_id), chapter_id)
            .await?;

        Ok(member)
    }

    async fn add(&self, user_id: UserId, chapter_ids: &[i32]) -> Result<(), AppError> {
        if chapter_ids.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        let key = purchased_chapters_key(&self.prefix, user_id);

        let _: () = redis::pipe()
            .atomic()
            .sadd(&key, chapter_ids)
            .ignore()
            .expire(&key, PURCHASE_CACHE_TTL_SECONDS)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(())
    }
}
