use super::*;

/// Tests buying several chapters over HTTP and reading them back from history.
///
/// Expected: 201 with one batch of two purchases, both listed in the history
#[tokio::test]
async fn batch_purchase_and_history() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let app = app(db);

    let (_, chapters) = factory::helpers::create_book_with_prices(db, &[100, 150, 250]).await?;
    factory::create_wallet(db, 1, 1_000).await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/purchases/chapters",
        Some("1"),
        Some(serde_json::json!({ "chapter_ids": [chapters[0].id, chapters[2].id] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_price"], 350);
    assert_eq!(body["purchases"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["purchases"][0]["batch_id"], body["id"]);

    let (status, body) = send(&app, Method::GET, "/api/wallet", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 650);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/purchases/chapters",
        Some("1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    Ok(())
}

/// Tests batch requests that cannot be fulfilled.
///
/// Expected: 401 without identity, 400 for an empty selection, 403 when broke
#[tokio::test]
async fn batch_purchase_errors() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let app = app(db);

    let (_, chapters) = factory::helpers::create_book_with_prices(db, &[500, 500]).await?;
    factory::create_wallet(db, 1, 100).await?;
    let ids = serde_json::json!({ "chapter_ids": [chapters[0].id, chapters[1].id] });

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/purchases/chapters",
        None,
        Some(ids.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/purchases/chapters",
        Some("1"),
        Some(serde_json::json!({ "chapter_ids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/purchases/chapters",
        Some("1"),
        Some(ids),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}
