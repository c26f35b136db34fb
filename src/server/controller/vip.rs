use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        vip::{GrantVipDto, VipStatusDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{user::UserId, vip::GrantVipRequest},
        service::vip::VipService,
        state::AppState,
    },
};

/// Tag for grouping VIP endpoints in OpenAPI documentation
pub static VIP_TAG: &str = "vip";

/// Get the caller's VIP status.
///
/// # Access Control
/// - Required `X-User-Id` header
#[utoipa::path(
    get,
    path = "/api/vip/status",
    tag = VIP_TAG,
    params(
        ("X-User-Id" = i64, Header, description = "Authenticated user ID")
    ),
    responses(
        (status = 200, description = "VIP status", body = VipStatusDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_vip_status(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let service = VipService::new(state.vip_store.as_ref(), &state.events);

    let status = service
        .get_status(&state.operation_context(), user_id)
        .await?;

    Ok((StatusCode::OK, Json(status.into_dto())))
}

/// Grant or renew a user's VIP access.
///
/// Re-granting resets the expiry to now plus the given duration.
///
/// # Access Control
/// - `Admin` - Caller must be listed in `ADMIN_USER_IDS`
///
/// # Returns
/// - `200 OK` - New VIP status
/// - `400 Bad Request` - Invalid user ID or non-positive duration
/// - `401 Unauthorized` - No user identity
/// - `403 Forbidden` - Caller is not an admin
#[utoipa::path(
    post,
    path = "/api/admin/vip",
    tag = VIP_TAG,
    params(
        ("X-User-Id" = i64, Header, description = "Authenticated admin user ID")
    ),
    request_body = GrantVipDto,
    responses(
        (status = 200, description = "VIP granted", body = VipStatusDto),
        (status = 400, description = "Invalid grant request", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn grant_vip(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(payload): Json<GrantVipDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.admin_user_ids).require(caller, &[Permission::Admin])?;

    let request = GrantVipRequest::from_dto(payload)?;
    let service = VipService::new(state.vip_store.as_ref(), &state.events);

    let status = service.grant(&state.operation_context(), request).await?;

    Ok((StatusCode::OK, Json(status.into_dto())))
}

/// Revoke a user's VIP access immediately.
///
/// # Access Control
/// - `Admin` - Caller must be listed in `ADMIN_USER_IDS`
///
/// # Returns
/// - `204 No Content` - VIP revoked (or user was not VIP)
/// - `400 Bad Request` - Invalid user ID
/// - `401 Unauthorized` - No user identity
/// - `403 Forbidden` - Caller is not an admin
#[utoipa::path(
    delete,
    path = "/api/admin/vip/{user_id}",
    tag = VIP_TAG,
    params(
        ("user_id" = i64, Path, description = "User whose VIP access is revoked"),
        ("X-User-Id" = i64, Header, description = "Authenticated admin user ID")
    ),
    responses(
        (status = 204, description = "VIP revoked"),
        (status = 400, description = "Invalid user ID", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn revoke_vip(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.admin_user_ids).require(caller, &[Permission::Admin])?;

    let user_id = UserId::new(user_id)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid user ID {}", user_id)))?;
    let service = VipService::new(state.vip_store.as_ref(), &state.events);

    service.revoke(&state.operation_context(), user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
