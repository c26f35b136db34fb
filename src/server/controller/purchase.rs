use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        purchase::{
            ChapterPurchaseBatchDto, PaginatedChapterPurchasesDto, PurchaseChaptersDto,
            PurchaseSummaryDto,
        },
    },
    server::{
        controller::{purchase_service, PaginationParams},
        data::wallet::WalletRepository,
        error::AppError,
        middleware::auth::AuthUser,
        service::purchase::run_detached,
        state::AppState,
    },
};

/// Tag for grouping purchase history endpoints in OpenAPI documentation
pub static PURCHASE_TAG: &str = "purchase";

/// Purchase several chapters of one book in a single payment.
///
/// Free chapters and chapters the caller already owns are skipped; the rest are
/// charged their list prices. The purchase finishes even if the client disconnects.
///
/// # Access Control
/// - Required `X-User-Id` header
///
/// # Returns
/// - `201 Created` - Batch purchase recorded
/// - `400 Bad Request` - Empty or oversized selection, chapters from several books,
///   or nothing left to buy
/// - `401 Unauthorized` - No user identity
/// - `403 Forbidden` - Insufficient balance
/// - `404 Not Found` - A chapter does not exist
/// - `408 Request Timeout` - Cancelled or timed out; any debit was refunded
/// - `409 Conflict` - A chapter was bought concurrently
#[utoipa::path(
    post,
    path = "/api/purchases/chapters",
    tag = PURCHASE_TAG,
    params(
        ("X-User-Id" = i64, Header, description = "Authenticated user ID")
    ),
    request_body = PurchaseChaptersDto,
    responses(
        (status = 201, description = "Chapters purchased", body = ChapterPurchaseBatchDto),
        (status = 400, description = "Invalid selection or nothing to buy", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient balance", body = ErrorDto),
        (status = 404, description = "Chapter not found", body = ErrorDto),
        (status = 408, description = "Operation cancelled or timed out", body = ErrorDto),
        (status = 409, description = "Chapter already purchased", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn purchase_chapters(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<PurchaseChaptersDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = state.operation_context();

    let batch = run_detached(async move {
        let wallet = WalletRepository::new(&state.db);
        let service = purchase_service(&state, &wallet);

        let batch = service
            .purchase_chapters(&ctx, user_id, &payload.chapter_ids)
            .await;
        batch
    })
    .await?;

    Ok((StatusCode::CREATED, Json(batch.into_dto())))
}

/// Get the caller's chapter purchases, newest first.
///
/// # Access Control
/// - Required `X-User-Id` header
///
/// # Returns
/// - `200 OK` - Paginated chapter purchases
/// - `401 Unauthorized` - No user identity
#[utoipa::path(
    get,
    path = "/api/purchases/chapters",
    tag = PURCHASE_TAG,
    params(
        ("X-User-Id" = i64, Header, description = "Authenticated user ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Chapter purchases", body = PaginatedChapterPurchasesDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_chapter_purchases(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let wallet = WalletRepository::new(&state.db);
    let service = purchase_service(&state, &wallet);

    let purchases = service
        .get_chapter_purchases(
            &state.operation_context(),
            user_id,
            params.page,
            params.per_page(),
        )
        .await?;

    Ok((StatusCode::OK, Json(purchases.into_dto())))
}

/// Get counts and total spend of the caller's purchases.
///
/// # Access Control
/// - Required `X-User-Id` header
#[utoipa::path(
    get,
    path = "/api/purchases/summary",
    tag = PURCHASE_TAG,
    params(
        ("X-User-Id" = i64, Header, description = "Authenticated user ID")
    ),
    responses(
        (status = 200, description = "Purchase summary", body = PurchaseSummaryDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_purchase_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let wallet = WalletRepository::new(&state.db);
    let service = purchase_service(&state, &wallet);

    let summary = service
        .get_purchase_summary(&state.operation_context(), user_id)
        .await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}
