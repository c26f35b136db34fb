use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory, fault};
use tokio_util::sync::CancellationToken;

use crate::server::{
    cache::{memory_store::MemoryCacheStore, PurchasedChapterCache, VipStatusStore},
    data::wallet::{Wallet, WalletRepository},
    error::{purchase::PurchaseError, AppError},
    event::{EventBus, PurchaseEvent},
    model::{access::AccessReason, context::OperationContext, money::Money, user::UserId},
    service::purchase::{run_detached, PurchaseService},
};


const DISCOUNT_PERCENT: i32 = 20;

fn user(id: i64) -> UserId {
    UserId::new(id).unwrap()
}

fn cents(amount: i64) -> Money {
    Money::from_cents(amount).unwrap()
}

fn ctx() -> OperationContext {
    OperationContext::default()
}

fn purchase_service<'a>(
    db: &'a DatabaseConnection,
    wallet: &'a dyn Wallet,
    cache: &'a MemoryCacheStore,
    events: &'a EventBus,
) -> PurchaseService<'a> {
    PurchaseService::new(db, wallet, cache, cache, events, DISCOUNT_PERCENT)
}

async fn balance(db: &DatabaseConnection, user_id: i64) -> Money {
    WalletRepository::new(db)
        .balance(user(user_id))
        .await
        .unwrap()
        .unwrap()
}

async fn ledger_rows(db: &DatabaseConnection, user_id: i64) -> Result<u64, DbErr> {
    entity::prelude::ChapterPurchase::find()
        .filter(entity::chapter_purchase::Column::UserId.eq(user_id))
        .count(db)
        .await
}

/// Wallet that cancels the operation right after a successful debit.
struct CancellingWallet<'a> {
    inner: WalletRepository<'a>,
    token: CancellationToken,
}

#[async_trait]
impl Wallet for CancellingWallet<'_> {
    async fn debit(&self, user_id: UserId, amount: Money, reference: &str) -> Result<(), AppError> {
        self.inner.debit(user_id, amount, reference).await?;
        self.token.cancel();
        Ok(())
    }

    async fn refund(&self, user_id: UserId, amount: Money, reference: &str) -> Result<(), AppError> {
        self.inner.refund(user_id, amount, reference).await
    }
}

/// Wallet that commits each debit and then stalls before returning.
struct SlowWallet {
    db: DatabaseConnection,
    delay: Duration,
}

#[async_trait]
impl Wallet for SlowWallet {
    async fn debit(&self, user_id: UserId, amount: Money, reference: &str) -> Result<(), AppError> {
        WalletRepository::new(&self.db)
            .debit(user_id, amount, reference)
            .await?;
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn refund(&self, user_id: UserId, amount: Money, reference: &str) -> Result<(), AppError> {
        WalletRepository::new(&self.db)
            .refund(user_id, amount, reference)
            .await
    }
}

/// Purchased-chapter cache whose every call fails.
struct UnavailableCache;

#[async_trait]
impl PurchasedChapterCache for UnavailableCache {
    async fn contains(&self, _user_id: UserId, _chapter_id: i32) -> Result<bool, AppError> {
        Err(AppError::InternalError("cache unavailable".to_string()))
    }

    async fn add(&self, _user_id: UserId, _chapter_ids: &[i32]) -> Result<(), AppError> {
        Err(AppError::InternalError("cache unavailable".to_string()))
    }
}
