use super::*;

/// Tests paging through a user's purchases.
///
/// Expected: Ok with the total count on every page and the remainder on the last page
#[tokio::test]
async fn paginates_user_purchases() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, models) = factory::helpers::create_book_with_prices(db, &[10, 20, 30, 40, 50]).await?;
    for model in &models {
        factory::purchase::create_chapter_purchase(db, 1, model).await?;
    }
    factory::purchase::create_chapter_purchase(db, 2, &models[0]).await?;

    let ledger = PurchaseLedger::new(db);
    let (first, total) = ledger.list_purchases(user(1), 0, 2).await.unwrap();
    let (last, _) = ledger.list_purchases(user(1), 2, 2).await.unwrap();

    assert_eq!(total, 5);
    assert_eq!(first.len(), 2);
    assert_eq!(last.len(), 1);
    assert!(first.iter().all(|p| p.user_id == user(1)));

    Ok(())
}

/// Tests that the purchase listing is ordered newest first.
///
/// Rows share a timestamp resolution, so ties fall back to insertion order.
///
/// Expected: Ok with the most recent purchase first
#[tokio::test]
async fn lists_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, models) = factory::helpers::create_book_with_prices(db, &[10, 20, 30]).await?;
    for model in &models {
        factory::purchase::create_chapter_purchase(db, 1, model).await?;
    }

    let ledger = PurchaseLedger::new(db);
    let (purchases, _) = ledger.list_purchases(user(1), 0, 10).await.unwrap();

    assert_eq!(purchases[0].chapter_id, models[2].id);
    assert_eq!(purchases[2].chapter_id, models[0].id);

    Ok(())
}

/// Tests listing purchases restricted to one book.
///
/// Expected: Ok with only that book's chapters, ordered by chapter ID
#[tokio::test]
async fn lists_book_purchases_by_chapter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (book, models) = factory::helpers::create_book_with_prices(db, &[10, 20, 30]).await?;
    let (_, other) = factory::helpers::create_book_with_prices(db, &[10]).await?;
    factory::purchase::create_chapter_purchase(db, 1, &models[2]).await?;
    factory::purchase::create_chapter_purchase(db, 1, &models[0]).await?;
    factory::purchase::create_chapter_purchase(db, 1, &other[0]).await?;

    let ledger = PurchaseLedger::new(db);
    let (purchases, total) = ledger
        .list_book_purchases(user(1), book.id, 0, 10)
        .await
        .unwrap();

    assert_eq!(total, 2);
    let ids: Vec<i32> = purchases.iter().map(|p| p.chapter_id).collect();
    assert_eq!(ids, vec![models[0].id, models[2].id]);

    let owned = ledger
        .list_purchased_chapter_ids(user(1), book.id)
        .await
        .unwrap();
    assert_eq!(owned, vec![models[0].id, models[2].id]);

    Ok(())
}
