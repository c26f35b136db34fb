use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use crate::{
    model::{
        api::ErrorDto,
        wallet::{DepositDto, WalletDto},
    },
    server::{
        data::wallet::WalletRepository,
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{money::Money, user::UserId},
        state::AppState,
    },
};

/// Tag for grouping wallet endpoints in OpenAPI documentation
pub static WALLET_TAG: &str = "wallet";

fn wallet_dto(user_id: UserId, balance: Money) -> WalletDto {
    WalletDto {
        user_id: user_id.as_i64(),
        balance: balance.cents(),
        balance_display: balance.to_string(),
    }
}

/// Get the caller's wallet balance.
///
/// # Access Control
/// - Required `X-User-Id` header
#[utoipa::path(
    get,
    path = "/api/wallet",
    tag = WALLET_TAG,
    params(
        ("X-User-Id" = i64, Header, description = "Authenticated user ID")
    ),
    responses(
        (status = 200, description = "Wallet balance", body = WalletDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_wallet(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let balance = WalletRepository::new(&state.db)
        .balance(user_id)
        .await?
        .unwrap_or(Money::ZERO);

    Ok((StatusCode::OK, Json(wallet_dto(user_id, balance))))
}

/// Add funds to a user's wallet, creating it if needed.
///
/// # Access Control
/// - `Admin` - Caller must be listed in `ADMIN_USER_IDS`
///
/// # Returns
/// - `200 OK` - Balance after the deposit
/// - `400 Bad Request` - Invalid user ID or non-positive amount
/// - `401 Unauthorized` - No user identity
/// - `403 Forbidden` - Caller is not an admin
#[utoipa::path(
    post,
    path = "/api/admin/wallet/deposit",
    tag = WALLET_TAG,
    params(
        ("X-User-Id" = i64, Header, description = "Authenticated admin user ID")
    ),
    request_body = DepositDto,
    responses(
        (status = 200, description = "Deposit applied", body = WalletDto),
        (status = 400, description = "Invalid deposit request", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn deposit(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(payload): Json<DepositDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.admin_user_ids).require(caller, &[Permission::Admin])?;

    let user_id = UserId::new(payload.user_id)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid user ID {}", payload.user_id)))?;
    let amount = Money::from_cents(payload.amount)?;
    if amount.is_zero() {
        return Err(AppError::BadRequest("Deposit amount must be positive".to_string()));
    }

    let reference = format!("deposit:{}:{}", user_id, Uuid::new_v4());
    let balance = WalletRepository::new(&state.db)
        .deposit(user_id, amount, &reference)
        .await?;

    tracing::info!("Admin {} deposited {} to user {}", caller, amount, user_id);

    Ok((StatusCode::OK, Json(wallet_dto(user_id, balance))))
}
