//! Wallet factory for creating funded test wallets.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a wallet for `user_id` holding `balance` cents.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Owner of the wallet
/// - `balance` - Starting balance in cents
pub async fn create_wallet(
    db: &DatabaseConnection,
    user_id: i64,
    balance: i64,
) -> Result<entity::wallet::Model, DbErr> {
    entity::wallet::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        balance: ActiveValue::Set(balance),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
