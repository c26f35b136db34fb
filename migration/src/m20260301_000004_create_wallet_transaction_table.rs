use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WalletTransaction::Table)
                    .if_not_exists()
                    .col(pk_auto(WalletTransaction::Id))
                    .col(big_integer(WalletTransaction::UserId))
                    .col(big_integer(WalletTransaction::Amount))
                    .col(string(WalletTransaction::Kind))
                    .col(string(WalletTransaction::Reference))
                    .col(timestamp_with_time_zone(WalletTransaction::CreatedAt))
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_wallet_transaction_reference_kind")
                            .col(WalletTransaction::Reference)
                            .col(WalletTransaction::Kind),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wallet_transaction_user_id")
                    .table(WalletTransaction::Table)
                    .col(WalletTransaction::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WalletTransaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WalletTransaction {
    Table,
    Id,
    UserId,
    Amount,
    Kind,
    Reference,
    CreatedAt,
}
