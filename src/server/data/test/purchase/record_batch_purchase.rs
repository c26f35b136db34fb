use super::*;

fn batch(user_id: i64, book_id: i32, chapters: Vec<Chapter>) -> RecordBatchPurchaseParams {
    let total = chapters.iter().map(|c| c.price.cents()).sum();
    RecordBatchPurchaseParams {
        user_id: user(user_id),
        book_id,
        chapters,
        total_price: cents(total),
    }
}

/// Tests recording a batch of two chapters.
///
/// Each chapter row keeps its own list price and points back at the batch.
///
/// Expected: Ok with one batch row and two linked chapter rows
#[tokio::test]
async fn records_batch_at_list_prices() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (book, _) = factory::helpers::create_book_with_prices(db, &[120, 80]).await?;
    let chapters = load_chapters(db, book.id).await;

    let ledger = PurchaseLedger::new(db);
    let recorded = ledger
        .record_batch_purchase(batch(1, book.id, chapters))
        .await
        .unwrap();

    assert_eq!(recorded.total_price, cents(200));
    assert_eq!(recorded.purchases.len(), 2);
    assert!(recorded
        .purchases
        .iter()
        .all(|p| p.batch_id == Some(recorded.id) && p.book_purchase_id.is_none()));
    let prices: Vec<i64> = recorded.purchases.iter().map(|p| p.price.cents()).collect();
    assert_eq!(prices, vec![120, 80]);

    let stored = entity::prelude::ChapterPurchaseBatch::find_by_id(recorded.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.chapter_count, 2);
    assert_eq!(count_chapter_rows(db, 1).await?, 2);

    Ok(())
}

/// Tests a batch containing a chapter the user already owns.
///
/// Expected: Err(AlreadyPurchased) with the whole batch rolled back
#[tokio::test]
async fn rolls_back_batch_on_owned_chapter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_ledger_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (book, models) = factory::helpers::create_book_with_prices(db, &[100, 100]).await?;
    factory::purchase::create_chapter_purchase(db, 1, &models[1]).await?;
    let chapters = load_chapters(db, book.id).await;

    let result = PurchaseLedger::new(db)
        .record_batch_purchase(batch(1, book.id, chapters))
        .await;

    assert!(matches!(
        result,
        Err(AppError::PurchaseErr(PurchaseError::AlreadyPurchased))
    ));
    assert_eq!(count_chapter_rows(db, 1).await?, 1);
    assert_eq!(entity::prelude::ChapterPurchaseBatch::find().count(db).await?, 0);

    Ok(())
}
