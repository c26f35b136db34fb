use std::{collections::HashSet, sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::Value;
use test_utils::{builder::TestBuilder, factory};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::server::{
    cache::memory_store::MemoryCacheStore, event::EventBus, middleware::auth::USER_ID_HEADER,
    router::router, state::AppState,
};

mod purchase;
mod vip;

const ADMIN_ID: i64 = 99;

/// `X-User-Id` header value of the admin configured in [`app`].
const ADMIN: &str = "99";

fn app(db: &DatabaseConnection) -> Router {
    let cache = MemoryCacheStore::new();
    let state = AppState::new(
        db.clone(),
        Arc::new(cache.clone()),
        Arc::new(cache),
        EventBus::new(16),
        20,
        Duration::from_secs(10),
        HashSet::from([ADMIN_ID]),
        CancellationToken::new(),
    );

    router().with_state(state)
}

/// Sends one request and returns the status with the parsed JSON body, if any.
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user_id: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header(USER_ID_HEADER, user_id);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
