use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WalletDto {
    pub user_id: i64,
    /// Balance in cents. Zero for users who never funded a wallet.
    pub balance: i64,
    pub balance_display: String,
}

/// Admin request to add funds to a user's wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DepositDto {
    pub user_id: i64,
    /// Amount in cents. Must be positive.
    pub amount: i64,
}
