use super::*;

/// Tests recording a first purchase of a chapter.
///
/// Expected: Ok with the record visible through the ownership queries
#[tokio::test]
async fn records_purchase() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    factory::create_paid_chapter(db, book.id, 199).await?;
    let chapter = load_chapters(db, book.id).await.remove(0);

    let ledger = PurchaseLedger::new(db);
    let purchase = ledger
        .record_chapter_purchase(user(1), &chapter, chapter.price)
        .await
        .unwrap();

    assert_eq!(purchase.chapter_id, chapter.id);
    assert_eq!(purchase.book_id, book.id);
    assert_eq!(purchase.price, cents(199));
    assert_eq!(purchase.book_purchase_id, None);

    assert!(ledger.has_purchased_chapter(user(1), chapter.id).await.unwrap());
    assert!(!ledger.has_purchased_chapter(user(2), chapter.id).await.unwrap());

    let found = ledger
        .find_chapter_purchase(user(1), chapter.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, purchase.id);

    Ok(())
}

/// Tests recording the same (user, chapter) pair twice.
///
/// Expected: Err(AlreadyPurchased) with exactly one row stored
#[tokio::test]
async fn rejects_duplicate_purchase() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    factory::create_paid_chapter(db, book.id, 100).await?;
    let chapter = load_chapters(db, book.id).await.remove(0);

    let ledger = PurchaseLedger::new(db);
    ledger
        .record_chapter_purchase(user(1), &chapter, chapter.price)
        .await
        .unwrap();
    let second = ledger
        .record_chapter_purchase(user(1), &chapter, chapter.price)
        .await;

    assert!(matches!(
        second,
        Err(AppError::PurchaseErr(PurchaseError::AlreadyPurchased))
    ));
    assert_eq!(count_chapter_rows(db, 1).await?, 1);

    Ok(())
}

/// Tests that different users may each purchase the same chapter.
///
/// Expected: Ok for both users
#[tokio::test]
async fn allows_same_chapter_for_different_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    factory::create_paid_chapter(db, book.id, 100).await?;
    let chapter = load_chapters(db, book.id).await.remove(0);

    let ledger = PurchaseLedger::new(db);
    assert!(ledger
        .record_chapter_purchase(user(1), &chapter, chapter.price)
        .await
        .is_ok());
    assert!(ledger
        .record_chapter_purchase(user(2), &chapter, chapter.price)
        .await
        .is_ok());

    Ok(())
}
