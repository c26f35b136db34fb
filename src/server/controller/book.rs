use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        book::{BookCatalogDto, BookPriceDto},
        chapter::BookChaptersDto,
        purchase::{BookPurchaseDto, PaginatedChapterPurchasesDto, PurchasedChapterIdsDto},
    },
    server::{
        controller::{purchase_service, PaginationParams},
        data::wallet::WalletRepository,
        error::AppError,
        middleware::auth::{AuthUser, MaybeUser},
        model::chapter::Chapter,
        service::{catalog::CatalogService, purchase::run_detached},
        state::AppState,
    },
};

/// Tag for grouping book endpoints in OpenAPI documentation
pub static BOOK_TAG: &str = "book";

#[derive(Deserialize)]
pub struct TrialParams {
    pub count: Option<u64>,
}

/// Quote the bundle price of a book.
///
/// Covers the paid chapters the caller does not own yet; anonymous callers are
/// quoted every paid chapter.
///
/// # Returns
/// - `200 OK` - Bundle quote
/// - `404 Not Found` - Book does not exist
#[utoipa::path(
    get,
    path = "/api/books/{book_id}/price",
    tag = BOOK_TAG,
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        ("X-User-Id" = Option<i64>, Header, description = "Authenticated user ID")
    ),
    responses(
        (status = 200, description = "Bundle quote", body = BookPriceDto),
        (status = 400, description = "Malformed user ID", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_book_price(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let wallet = WalletRepository::new(&state.db);
    let service = purchase_service(&state, &wallet);

    let quote = service
        .calculate_book_price(&state.operation_context(), user_id, book_id)
        .await?;

    Ok((StatusCode::OK, Json(quote.into_dto())))
}

/// Get a book's chapter catalog.
///
/// Lists every chapter in order with its price flags, marking the ones the caller
/// owns.
///
/// # Returns
/// - `200 OK` - Catalog
/// - `404 Not Found` - Book does not exist
#[utoipa::path(
    get,
    path = "/api/books/{book_id}/catalog",
    tag = BOOK_TAG,
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        ("X-User-Id" = Option<i64>, Header, description = "Authenticated user ID")
    ),
    responses(
        (status = 200, description = "Book catalog", body = BookCatalogDto),
        (status = 400, description = "Malformed user ID", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_book_catalog(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = CatalogService::new(&state.db);

    let catalog = service
        .get_catalog(&state.operation_context(), user_id, book_id)
        .await?;

    Ok((StatusCode::OK, Json(catalog.into_dto())))
}

/// Purchase every remaining paid chapter of a book as a discounted bundle.
///
/// # Access Control
/// - Required `X-User-Id` header
///
/// # Returns
/// - `201 Created` - Bundle purchase recorded
/// - `400 Bad Request` - No paid chapters left to buy
/// - `401 Unauthorized` - No user identity
/// - `403 Forbidden` - Insufficient balance
/// - `404 Not Found` - Book does not exist
/// - `408 Request Timeout` - Cancelled or timed out; any debit was refunded
/// - `409 Conflict` - Book already purchased
#[utoipa::path(
    post,
    path = "/api/books/{book_id}/purchase",
    tag = BOOK_TAG,
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        ("X-User-Id" = i64, Header, description = "Authenticated user ID")
    ),
    responses(
        (status = 201, description = "Book purchased", body = BookPurchaseDto),
        (status = 400, description = "No paid chapters left or malformed user ID", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient balance", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 408, description = "Operation cancelled or timed out", body = ErrorDto),
        (status = 409, description = "Book already purchased", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn purchase_book(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = state.operation_context();

    let purchase = run_detached(async move {
        let wallet = WalletRepository::new(&state.db);
        let service = purchase_service(&state, &wallet);

        let purchase = service.purchase_book(&ctx, user_id, book_id).await;
        purchase
    })
    .await?;

    Ok((StatusCode::CREATED, Json(purchase.into_dto())))
}

/// Get the chapters offered as a free trial of a book.
///
/// Returns the book's first free chapters, topped up with the earliest paid chapters
/// when there are fewer free chapters than requested.
///
/// # Returns
/// - `200 OK` - Trial chapters in chapter order
/// - `404 Not Found` - Book does not exist
#[utoipa::path(
    get,
    path = "/api/books/{book_id}/trial-chapters",
    tag = BOOK_TAG,
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        ("count" = Option<u64>, Query, description = "Number of chapters (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Trial chapters", body = BookChaptersDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_trial_chapters(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    Query(params): Query<TrialParams>,
) -> Result<impl IntoResponse, AppError> {
    let service = CatalogService::new(&state.db);

    let chapters = service
        .get_trial_chapters(&state.operation_context(), book_id, params.count)
        .await?;

    Ok((StatusCode::OK, Json(chapters_dto(book_id, chapters))))
}

/// Get a book's VIP chapters.
///
/// # Returns
/// - `200 OK` - VIP chapters in chapter order
/// - `404 Not Found` - Book does not exist
#[utoipa::path(
    get,
    path = "/api/books/{book_id}/vip-chapters",
    tag = BOOK_TAG,
    params(
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "VIP chapters", body = BookChaptersDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_vip_chapters(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = CatalogService::new(&state.db);

    let chapters = service
        .get_vip_chapters(&state.operation_context(), book_id)
        .await?;

    Ok((StatusCode::OK, Json(chapters_dto(book_id, chapters))))
}

fn chapters_dto(book_id: i32, chapters: Vec<Chapter>) -> BookChaptersDto {
    BookChaptersDto {
        book_id,
        chapters: chapters.into_iter().map(|c| c.into_summary_dto()).collect(),
    }
}

/// Get the caller's chapter purchases within a book.
///
/// # Access Control
/// - Required `X-User-Id` header
///
/// # Returns
/// - `200 OK` - Paginated purchases ordered by chapter
/// - `401 Unauthorized` - No user identity
#[utoipa::path(
    get,
    path = "/api/books/{book_id}/purchases",
    tag = BOOK_TAG,
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        ("X-User-Id" = i64, Header, description = "Authenticated user ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Chapter purchases in this book", body = PaginatedChapterPurchasesDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_book_purchases(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(book_id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let wallet = WalletRepository::new(&state.db);
    let service = purchase_service(&state, &wallet);

    let purchases = service
        .get_book_purchases(
            &state.operation_context(),
            user_id,
            book_id,
            params.page,
            params.per_page(),
        )
        .await?;

    Ok((StatusCode::OK, Json(purchases.into_dto())))
}

/// Get the IDs of chapters in a book the caller owns.
///
/// # Access Control
/// - Required `X-User-Id` header
///
/// # Returns
/// - `200 OK` - Owned chapter IDs, ascending
/// - `401 Unauthorized` - No user identity
#[utoipa::path(
    get,
    path = "/api/books/{book_id}/purchased-chapters",
    tag = BOOK_TAG,
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        ("X-User-Id" = i64, Header, description = "Authenticated user ID")
    ),
    responses(
        (status = 200, description = "Owned chapter IDs", body = PurchasedChapterIdsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_purchased_chapter_ids(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let wallet = WalletRepository::new(&state.db);
    let service = purchase_service(&state, &wallet);

    let chapter_ids = service
        .get_purchased_chapter_ids(&state.operation_context(), user_id, book_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(PurchasedChapterIdsDto {
            book_id,
            chapter_ids,
        }),
    ))
}
