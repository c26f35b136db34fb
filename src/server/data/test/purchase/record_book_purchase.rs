use super::*;

fn bundle(
    user_id: i64,
    book_id: i32,
    chapters: Vec<Chapter>,
    total: i64,
    original: i64,
) -> RecordBookPurchaseParams {
    RecordBookPurchaseParams {
        user_id: user(user_id),
        book_id,
        chapters,
        total_price: cents(total),
        original_price: cents(original),
        discount_percent: 20,
    }
}

/// Tests recording a bundle of three chapters with a discounted total.
///
/// Chapter rows carry proportional shares of the total which add up to it exactly.
///
/// Expected: Ok with one book row and three chapter rows linked to it
#[tokio::test]
async fn records_bundle_with_shares_summing_to_total() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (book, _) = factory::helpers::create_book_with_prices(db, &[100, 150, 250]).await?;
    let chapters = load_chapters(db, book.id).await;

    let ledger = PurchaseLedger::new(db);
    let (book_purchase, rows) = ledger
        .record_book_purchase(bundle(1, book.id, chapters, 400, 500))
        .await
        .unwrap();

    assert_eq!(book_purchase.total_price, cents(400));
    assert_eq!(book_purchase.original_price, cents(500));
    assert_eq!(book_purchase.discount_percent, 20);
    assert_eq!(book_purchase.chapter_count, 3);

    assert_eq!(rows.len(), 3);
    assert!(rows
        .iter()
        .all(|r| r.book_purchase_id == Some(book_purchase.id)));
    let shares: i64 = rows.iter().map(|r| r.price.cents()).sum();
    assert_eq!(shares, 400);
    let prices: Vec<i64> = rows.iter().map(|r| r.price.cents()).collect();
    assert_eq!(prices, vec![80, 120, 200]);

    assert!(ledger.has_purchased_book(user(1), book.id).await.unwrap());

    Ok(())
}

/// Tests that free chapters passed in the bundle are not recorded.
///
/// Expected: Ok with rows only for the paid chapters
#[tokio::test]
async fn skips_free_chapters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (book, _) = factory::helpers::create_book_with_prices(db, &[0, 300]).await?;
    let chapters = load_chapters(db, book.id).await;

    let ledger = PurchaseLedger::new(db);
    let (book_purchase, rows) = ledger
        .record_book_purchase(bundle(1, book.id, chapters, 240, 300))
        .await
        .unwrap();

    assert_eq!(book_purchase.chapter_count, 1);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].price, cents(240));

    Ok(())
}

/// Tests buying the same book twice.
///
/// Expected: Err(AlreadyPurchased) with the first bundle intact
#[tokio::test]
async fn rejects_second_bundle_for_same_book() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (book, _) = factory::helpers::create_book_with_prices(db, &[100, 100]).await?;
    let chapters = load_chapters(db, book.id).await;

    let ledger = PurchaseLedger::new(db);
    ledger
        .record_book_purchase(bundle(1, book.id, chapters.clone(), 160, 200))
        .await
        .unwrap();
    let second = ledger
        .record_book_purchase(bundle(1, book.id, chapters, 160, 200))
        .await;

    assert!(matches!(
        second,
        Err(AppError::PurchaseErr(PurchaseError::AlreadyPurchased))
    ));
    assert_eq!(count_chapter_rows(db, 1).await?, 2);

    Ok(())
}

/// Tests that a conflicting chapter row rolls back the whole bundle.
///
/// The user already owns the second chapter, so inserting its bundle row conflicts.
///
/// Expected: Err(AlreadyPurchased) with no book row and no new chapter rows
#[tokio::test]
async fn rolls_back_on_chapter_conflict() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (book, models) = factory::helpers::create_book_with_prices(db, &[100, 100, 100]).await?;
    factory::purchase::create_chapter_purchase(db, 1, &models[1]).await?;
    let chapters = load_chapters(db, book.id).await;

    let ledger = PurchaseLedger::new(db);
    let result = ledger
        .record_book_purchase(bundle(1, book.id, chapters, 240, 300))
        .await;

    assert!(matches!(
        result,
        Err(AppError::PurchaseErr(PurchaseError::AlreadyPurchased))
    ));
    assert!(!ledger.has_purchased_book(user(1), book.id).await.unwrap());
    assert_eq!(count_chapter_rows(db, 1).await?, 1);

    Ok(())
}
