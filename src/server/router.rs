use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{book, chapter, purchase, vip, wallet},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Folio API", description = "Paid chapter and VIP access for serialized books"),
    paths(
        chapter::get_chapter_price,
        chapter::check_chapter_access,
        chapter::purchase_chapter,
        book::get_book_price,
        book::get_book_catalog,
        book::purchase_book,
        book::get_book_purchases,
        book::get_purchased_chapter_ids,
        book::get_trial_chapters,
        book::get_vip_chapters,
        purchase::purchase_chapters,
        purchase::get_chapter_purchases,
        purchase::get_purchase_summary,
        vip::get_vip_status,
        vip::grant_vip,
        vip::revoke_vip,
        wallet::get_wallet,
        wallet::deposit,
    ),
    tags(
        (name = "chapter", description = "Chapter pricing, access and purchase"),
        (name = "book", description = "Book bundles, catalogs and per-book ownership"),
        (name = "purchase", description = "Batch purchases and purchase history"),
        (name = "vip", description = "VIP status and administration"),
        (name = "wallet", description = "Wallet balance and funding"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/chapters/{chapter_id}/price", get(chapter::get_chapter_price))
        .route("/api/chapters/{chapter_id}/access", get(chapter::check_chapter_access))
        .route("/api/chapters/{chapter_id}/purchase", post(chapter::purchase_chapter))
        .route("/api/books/{book_id}/price", get(book::get_book_price))
        .route("/api/books/{book_id}/catalog", get(book::get_book_catalog))
        .route("/api/books/{book_id}/purchase", post(book::purchase_book))
        .route("/api/books/{book_id}/purchases", get(book::get_book_purchases))
        .route(
            "/api/books/{book_id}/purchased-chapters",
            get(book::get_purchased_chapter_ids),
        )
        .route(
            "/api/books/{book_id}/trial-chapters",
            get(book::get_trial_chapters),
        )
        .route("/api/books/{book_id}/vip-chapters", get(book::get_vip_chapters))
        .route(
            "/api/purchases/chapters",
            get(purchase::get_chapter_purchases).post(purchase::purchase_chapters),
        )
        .route("/api/purchases/summary", get(purchase::get_purchase_summary))
        .route("/api/vip/status", get(vip::get_vip_status))
        .route("/api/admin/vip", post(vip::grant_vip))
        .route("/api/admin/vip/{user_id}", delete(vip::revoke_vip))
        .route("/api/wallet", get(wallet::get_wallet))
        .route("/api/admin/wallet/deposit", post(wallet::deposit))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
