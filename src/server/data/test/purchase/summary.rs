use super::*;

/// Tests the summary of a user who bought one chapter and one bundle.
///
/// Expected: Ok with chapter count covering bundle rows and spend summing chapter prices
#[tokio::test]
async fn summarizes_chapter_and_book_purchases() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, singles) = factory::helpers::create_book_with_prices(db, &[199]).await?;
    factory::purchase::create_chapter_purchase(db, 1, &singles[0]).await?;

    let (bundle_book, _) = factory::helpers::create_book_with_prices(db, &[100, 150, 250]).await?;
    let chapters = load_chapters(db, bundle_book.id).await;

    let ledger = PurchaseLedger::new(db);
    ledger
        .record_book_purchase(RecordBookPurchaseParams {
            user_id: user(1),
            book_id: bundle_book.id,
            chapters,
            total_price: cents(400),
            original_price: cents(500),
            discount_percent: 20,
        })
        .await
        .unwrap();

    let summary = ledger.summary(user(1)).await.unwrap();

    assert_eq!(summary.chapter_count, 4);
    assert_eq!(summary.book_count, 1);
    assert_eq!(summary.total_spent, cents(599));

    Ok(())
}

/// Tests the summary of a user with no purchases.
///
/// Expected: Ok with zero counts and zero spend
#[tokio::test]
async fn empty_summary_for_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let summary = PurchaseLedger::new(db).summary(user(9)).await.unwrap();

    assert_eq!(summary.chapter_count, 0);
    assert_eq!(summary.book_count, 0);
    assert_eq!(summary.total_spent, Money::ZERO);

    Ok(())
}
