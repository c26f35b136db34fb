//! Wallet collaborator.
//!
//! Balances live in the `wallet` table; every balance movement is journaled in
//! `wallet_transaction` under a caller-chosen reference. The unique
//! `(reference, kind)` index makes refunds idempotent: refunding the same debit
//! reference twice credits the wallet once.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, TransactionTrait,
};

use crate::server::{
    data::is_unique_violation,
    error::{purchase::PurchaseError, AppError},
    model::{money::Money, user::UserId},
};

/// Journal entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Debit,
    Refund,
    Deposit,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Refund => "refund",
            Self::Deposit => "deposit",
        }
    }
}

/// Balance check-and-debit with compensating refunds.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Atomically removes `amount` from the user's balance.
    ///
    /// # Returns
    /// - `Ok(())` - Balance debited and journaled under `reference`
    /// - `Err(PurchaseError::InsufficientBalance)` - Balance too low or no wallet
    async fn debit(&self, user_id: UserId, amount: Money, reference: &str) -> Result<(), AppError>;

    /// Returns `amount` to the user's balance. Repeating a refund for the same
    /// `reference` has no further effect.
    async fn refund(&self, user_id: UserId, amount: Money, reference: &str)
        -> Result<(), AppError>;
}

pub struct WalletRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WalletRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a user's balance.
    ///
    /// # Returns
    /// - `Ok(Some(Money))` - Current balance
    /// - `Ok(None)` - User has no wallet
    pub async fn balance(&self, user_id: UserId) -> Result<Option<Money>, AppError> {
        let wallet = entity::prelude::Wallet::find_by_id(user_id.as_i64())
            .one(self.db)
            .await?;

        Ok(wallet.map(|w| Money::from_cents(w.balance)).transpose()?)
    }

    /// Adds funds to a user's wallet, creating the wallet if needed.
    ///
    /// # Returns
    /// - `Ok(Money)` - Balance after the deposit
    pub async fn deposit(
        &self,
        user_id: UserId,
        amount: Money,
        reference: &str,
    ) -> Result<Money, AppError> {
        let txn = self.db.begin().await?;

        let updated = add_to_balance(&txn, user_id, amount).await?;
        if !updated {
            entity::wallet::ActiveModel {
                user_id: ActiveValue::Set(user_id.as_i64()),
                balance: ActiveValue::Set(amount.cents()),
                updated_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&txn)
            .await?;
        }

        journal(&txn, user_id, amount.cents(), TransactionKind::Deposit, reference).await?;

        let wallet = entity::prelude::Wallet::find_by_id(user_id.as_i64())
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!("Wallet for user {} vanished during deposit", user_id))
            })?;

        txn.commit().await?;

        Ok(Money::from_cents(wallet.balance)?)
    }
}

#[async_trait]
impl Wallet for WalletRepository<'_> {
    async fn debit(&self, user_id: UserId, amount: Money, reference: &str) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        let result = entity::prelude::Wallet::update_many()
            .col_expr(
                entity::wallet::Column::Balance,
                Expr::col(entity::wallet::Column::Balance).sub(amount.cents()),
            )
            .col_expr(entity::wallet::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::wallet::Column::UserId.eq(user_id.as_i64()))
            .filter(entity::wallet::Column::Balance.gte(amount.cents()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(PurchaseError::InsufficientBalance.into());
        }

        journal(&txn, user_id, -amount.cents(), TransactionKind::Debit, reference).await?;

        txn.commit().await?;

        tracing::debug!("Debited {} from user {} ({})", amount, user_id, reference);

        Ok(())
    }

    async fn refund(&self, user_id: UserId, amount: Money, reference: &str) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        match journal(&txn, user_id, amount.cents(), TransactionKind::Refund, reference).await {
            Ok(()) => {}
            Err(err) if is_unique_violation(&err) => {
                tracing::debug!("Refund {} already applied for user {}", reference, user_id);
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }

        if !add_to_balance(&txn, user_id, amount).await? {
            return Err(AppError::InternalError(format!(
                "Cannot refund {} to user {} without a wallet",
                amount, user_id
            )));
        }

        txn.commit().await?;

        tracing::debug!("Refunded {} to user {} ({})", amount, user_id, reference);

        Ok(())
    }
}

/// Credits an existing wallet. Returns `false` when the user has no wallet.
async fn add_to_balance(
    txn: &DatabaseTransaction,
    user_id: UserId,
    amount: Money,
) -> Result<bool, sea_orm::DbErr> {
    let result = entity::prelude::Wallet::update_many()
        .col_expr(
            entity::wallet::Column::Balance,
            Expr::col(entity::wallet::Column::Balance).add(amount.cents()),
        )
        .col_expr(entity::wallet::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(entity::wallet::Column::UserId.eq(user_id.as_i64()))
        .exec(txn)
        .await?;

    Ok(result.rows_affected > 0)
}

async fn journal(
    txn: &DatabaseTransaction,
    user_id: UserId,
    signed_cents: i64,
    kind: TransactionKind,
    reference: &str,
) -> Result<(), sea_orm::DbErr> {
    entity::wallet_transaction::ActiveModel {
        user_id: ActiveValue::Set(user_id.as_i64()),
        amount: ActiveValue::Set(signed_cents),
        kind: ActiveValue::Set(kind.as_str().to_string()),
        reference: ActiveValue::Set(reference.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok(())
}
