//! VIP status store and purchased-chapter cache.
//!
//! VIP membership is the presence of a key with a TTL; there is no persisted VIP
//! table. Purchased chapter IDs are mirrored into a per-user set as a fast path in
//! front of the purchase ledger, which stays authoritative.
//!
//! Two implementations exist: [`redis_store::RedisCacheStore`] for deployments and
//! [`memory_store::MemoryCacheStore`] for local runs without Redis and for tests.

pub mod memory_store;
pub mod redis_store;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::server::{error::AppError, model::user::UserId};

/// Key holding a user's VIP membership; presence with TTL means active.
pub fn vip_status_key(prefix: &str, user_id: UserId) -> String {
    format!("{}:vip:user:{}:status", prefix, user_id)
}

/// Set of chapter IDs a user is known to have purchased.
pub fn purchased_chapters_key(prefix: &str, user_id: UserId) -> String {
    format!("{}:vip:purchase:{}:chapters", prefix, user_id)
}

#[async_trait]
pub trait VipStatusStore: Send + Sync {
    /// True iff a non-expired VIP record exists. Absence is not an error.
    async fn is_vip(&self, user_id: UserId) -> Result<bool, AppError>;

    /// Creates or overwrites the record so it expires `duration` from now.
    ///
    /// Returns the new expiry.
    async fn grant(&self, user_id: UserId, duration: Duration) -> Result<DateTime<Utc>, AppError>;

    /// Deletes the record immediately. Revoking a non-VIP user is a no-op.
    async fn revoke(&self, user_id: UserId) -> Result<(), AppError>;

    /// Expiry of the active record, `None` when the user is not VIP.
    async fn expires_at(&self, user_id: UserId) -> Result<Option<DateTime<Utc>>, AppError>;
}

#[async_trait]
pub trait PurchasedChapterCache: Send + Sync {
    /// Whether the cache knows `user_id` owns `chapter_id`. A miss proves nothing.
    async fn contains(&self, user_id: UserId, chapter_id: i32) -> Result<bool, AppError>;

    /// Records chapters the user now owns.
    async fn add(&self, user_id: UserId, chapter_ids: &[i32]) -> Result<(), AppError>;
}

/// Converts a positive duration to whole seconds for a key TTL, never below one.
pub(crate) fn ttl_seconds(duration: Duration) -> u64 {
    let millis = duration.num_milliseconds().max(1) as u64;
    millis.div_ceil(1000)
}
