use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        chapter::{ChapterAccessDto, ChapterPriceDto},
        purchase::ChapterPurchaseDto,
    },
    server::{
        controller::purchase_service,
        data::wallet::WalletRepository,
        error::AppError,
        middleware::auth::{AuthUser, MaybeUser},
        service::purchase::run_detached,
        state::AppState,
    },
};

/// Tag for grouping chapter endpoints in OpenAPI documentation
pub static CHAPTER_TAG: &str = "chapter";

/// Get the purchase price of a chapter.
///
/// Free chapters are priced at zero.
///
/// # Returns
/// - `200 OK` - Chapter price
/// - `404 Not Found` - Chapter does not exist
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/chapters/{chapter_id}/price",
    tag = CHAPTER_TAG,
    params(
        ("chapter_id" = i32, Path, description = "Chapter ID")
    ),
    responses(
        (status = 200, description = "Chapter price", body = ChapterPriceDto),
        (status = 404, description = "Chapter not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_chapter_price(
    State(state): State<AppState>,
    Path(chapter_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let wallet = WalletRepository::new(&state.db);
    let service = purchase_service(&state, &wallet);

    let (chapter, price) = service
        .get_chapter_price(&state.operation_context(), chapter_id)
        .await?;

    Ok((StatusCode::OK, Json(chapter.into_price_dto(price))))
}

/// Check whether the caller may read a chapter.
///
/// Anonymous callers may check access; only free chapters open for them. A locked
/// chapter is a successful response with `can_access = false`.
///
/// # Access Control
/// - Optional `X-User-Id` header
///
/// # Returns
/// - `200 OK` - Access verdict
/// - `400 Bad Request` - Malformed user ID
/// - `404 Not Found` - Chapter does not exist
/// - `500 Internal Server Error` - Database or cache error
#[utoipa::path(
    get,
    path = "/api/chapters/{chapter_id}/access",
    tag = CHAPTER_TAG,
    params(
        ("chapter_id" = i32, Path, description = "Chapter ID"),
        ("X-User-Id" = Option<i64>, Header, description = "Authenticated user ID")
    ),
    responses(
        (status = 200, description = "Access verdict", body = ChapterAccessDto),
        (status = 400, description = "Malformed user ID", body = ErrorDto),
        (status = 404, description = "Chapter not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_chapter_access(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
    Path(chapter_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let wallet = WalletRepository::new(&state.db);
    let service = purchase_service(&state, &wallet);

    let access = service
        .check_access(&state.operation_context(), user_id, chapter_id)
        .await?;

    Ok((StatusCode::OK, Json(access.into_dto())))
}

/// Purchase a single chapter.
///
/// Debits the caller's wallet by the chapter price and records the purchase. The
/// purchase finishes even if the client disconnects.
///
/// # Access Control
/// - Required `X-User-Id` header
///
/// # Returns
/// - `201 Created` - Purchase recorded
/// - `400 Bad Request` - Chapter is free, or malformed user ID
/// - `401 Unauthorized` - No user identity
/// - `403 Forbidden` - Insufficient balance
/// - `404 Not Found` - Chapter does not exist
/// - `408 Request Timeout` - Cancelled or timed out; any debit was refunded
/// - `409 Conflict` - Chapter already purchased
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/chapters/{chapter_id}/purchase",
    tag = CHAPTER_TAG,
    params(
        ("chapter_id" = i32, Path, description = "Chapter ID"),
        ("X-User-Id" = i64, Header, description = "Authenticated user ID")
    ),
    responses(
        (status = 201, description = "Chapter purchased", body = ChapterPurchaseDto),
        (status = 400, description = "Free chapter or malformed user ID", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient balance", body = ErrorDto),
        (status = 404, description = "Chapter not found", body = ErrorDto),
        (status = 408, description = "Operation cancelled or timed out", body = ErrorDto),
        (status = 409, description = "Chapter already purchased", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn purchase_chapter(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(chapter_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = state.operation_context();

    let purchase = run_detached(async move {
        let wallet = WalletRepository::new(&state.db);
        let service = purchase_service(&state, &wallet);

        let purchase = service.purchase_chapter(&ctx, user_id, chapter_id).await;
        purchase
    })
    .await?;

    Ok((StatusCode::CREATED, Json(purchase.into_dto())))
}
