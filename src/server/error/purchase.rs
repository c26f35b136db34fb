use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Caller-visible failures of chapter access and purchase operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// Chapter or book does not exist.
    ///
    /// Results in 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// The ledger already holds a purchase for this (user, chapter) or (user, book).
    ///
    /// Results in 409 Conflict.
    #[error("already purchased")]
    AlreadyPurchased,

    /// The wallet refused the debit.
    ///
    /// Results in 403 Forbidden.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Free chapters cannot be purchased.
    ///
    /// Results in 400 Bad Request.
    #[error("cannot purchase free chapter")]
    FreeChapter,

    /// Bundle discount outside [0, 100].
    ///
    /// Results in 400 Bad Request.
    #[error("invalid discount percent {0}, expected 0-100")]
    InvalidDiscount(i32),

    /// A whole-book purchase found no paid chapters left to buy.
    ///
    /// Results in 400 Bad Request.
    #[error("no paid chapters left to purchase")]
    NoPaidChapters,

    /// A multi-chapter purchase request that cannot be fulfilled as given, e.g. an
    /// empty selection or chapters from different books.
    ///
    /// Results in 400 Bad Request.
    #[error("{0}")]
    InvalidSelection(String),

    /// The caller cancelled the operation.
    ///
    /// Results in 408 Request Timeout.
    #[error("operation cancelled")]
    Cancelled,

    /// The operation's deadline passed before it completed.
    ///
    /// Results in 408 Request Timeout.
    #[error("operation deadline exceeded")]
    DeadlineExceeded,
}

/// Converts purchase errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `FreeChapter`, `InvalidDiscount`, `NoPaidChapters`, `InvalidSelection`
/// - 403 Forbidden - `InsufficientBalance`
/// - 404 Not Found - `NotFound`
/// - 408 Request Timeout - `Cancelled`, `DeadlineExceeded`
/// - 409 Conflict - `AlreadyPurchased`
impl IntoResponse for PurchaseError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyPurchased => StatusCode::CONFLICT,
            Self::InsufficientBalance => StatusCode::FORBIDDEN,
            Self::FreeChapter
            | Self::InvalidDiscount(_)
            | Self::NoPaidChapters
            | Self::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            Self::Cancelled | Self::DeadlineExceeded => StatusCode::REQUEST_TIMEOUT,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
