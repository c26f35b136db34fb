use super::*;

use serde_json::json;

/// Tests that only admins may grant VIP access.
///
/// Expected: 403 for a regular user, 200 for an admin, then status shows VIP
#[tokio::test]
async fn admin_grants_vip() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let app = app(db);
    let payload = json!({ "user_id": 1, "duration_secs": 3600 });

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/vip",
        Some("1"),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/vip",
        Some(ADMIN),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_vip"], true);

    let (status, body) = send(&app, Method::GET, "/api/vip/status", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_vip"], true);

    let (status, _) = send(&app, Method::DELETE, "/api/admin/vip/1", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/api/vip/status", Some("1"), None).await;
    assert_eq!(body["is_vip"], false);

    Ok(())
}

/// Tests rejecting a grant with a non-positive duration.
///
/// Expected: 400
#[tokio::test]
async fn rejects_zero_duration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let app = app(db);

    let payload = json!({ "user_id": 1, "duration_secs": 0 });
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/vip",
        Some(ADMIN),
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}
