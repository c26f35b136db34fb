//! Caller identity at the HTTP boundary.
//!
//! The upstream gateway authenticates readers and forwards their numeric ID in the
//! `X-User-Id` header. Handlers take [`AuthUser`] when identity is required and
//! [`MaybeUser`] when anonymous callers are allowed; services only ever see a typed
//! `UserId` or `Option<UserId>`.

use std::collections::HashSet;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::UserId,
};

/// Header carrying the authenticated user's ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller. Rejects requests without a valid identity.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

/// Optionally authenticated caller. A malformed identity is still rejected.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<UserId>);

fn user_from_parts(parts: &Parts) -> Result<Option<UserId>, AuthError> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let raw = value
        .to_str()
        .map_err(|_| AuthError::InvalidUserId(String::from_utf8_lossy(value.as_bytes()).into_owned()))?;

    raw.parse::<UserId>().map(Some)
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match user_from_parts(parts)? {
            Some(user_id) => Ok(Self(user_id)),
            None => {
                tracing::debug!("Rejected anonymous request to {}", parts.uri);
                Err(AuthError::Unauthenticated.into())
            }
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(user_from_parts(parts)?))
    }
}

pub enum Permission {
    Admin,
}

pub struct AuthGuard<'a> {
    admin_user_ids: &'a HashSet<i64>,
}

impl<'a> AuthGuard<'a> {
    pub fn new(admin_user_ids: &'a HashSet<i64>) -> Self {
        Self { admin_user_ids }
    }

    /// Checks that `user_id` holds every permission in `permissions`.
    ///
    /// # Returns
    /// - `Ok(UserId)` - All permissions granted
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub fn require(&self, user_id: UserId, permissions: &[Permission]) -> Result<UserId, AppError> {
        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !self.admin_user_ids.contains(&user_id.as_i64()) {
                        return Err(AuthError::AccessDenied(
                            user_id.as_i64(),
                            "User attempted an admin operation without admin permissions"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user_id)
    }
}
