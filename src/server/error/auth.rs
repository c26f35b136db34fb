use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user identity accompanied a request that requires one.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Authentication required")]
    Unauthenticated,

    /// The forwarded user identity could not be parsed as a user ID.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Invalid user ID '{0}'")]
    InvalidUserId(String),

    /// The user is authenticated but lacks a required permission.
    ///
    /// Results in a 403 Forbidden response. The reason is logged, not returned.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i64, String),
}

/// Converts authentication errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For malformed user IDs
/// - 401 Unauthorized - For missing identity
/// - 403 Forbidden - For missing permissions
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::InvalidUserId(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(user_id, reason) => {
                tracing::debug!("Access denied for user {}: {}", user_id, reason);
                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "Insufficient permissions".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
