use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, AuthUser, MaybeUser, Permission, USER_ID_HEADER},
    model::user::UserId,
};
use axum::{extract::FromRequestParts, http::Request};
