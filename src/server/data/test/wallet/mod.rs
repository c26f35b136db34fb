use crate::server::{
    data::wallet::{Wallet, WalletRepository},
    error::{purchase::PurchaseError, AppError},
    model::{money::Money, user::UserId},
};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod debit;
mod deposit;
mod refund;

fn user(id: i64) -> UserId {
    UserId::new(id).unwrap()
}

fn cents(amount: i64) -> Money {
    Money::from_cents(amount).unwrap()
}

async fn journal_for(
    db: &sea_orm::DatabaseConnection,
    reference: &str,
) -> Result<Vec<entity::wallet_transaction::Model>, DbErr> {
    entity::prelude::WalletTransaction::find()
        .filter(entity::wallet_transaction::Column::Reference.eq(reference))
        .all(db)
        .await
}
