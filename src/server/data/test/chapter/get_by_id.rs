use super::*;

/// Tests fetching an existing paid chapter.
///
/// Expected: Ok(Some) with price and flags preserved
#[tokio::test]
async fn returns_existing_chapter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    let created = factory::create_vip_chapter(db, book.id, 250).await?;

    let repo = ChapterRepository::new(db);
    let chapter = repo.get_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(chapter.id, created.id);
    assert_eq!(chapter.book_id, book.id);
    assert_eq!(chapter.price.cents(), 250);
    assert!(chapter.is_vip);
    assert!(chapter.is_paid());

    Ok(())
}

/// Tests fetching a chapter ID that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_chapter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ChapterRepository::new(db);
    let result = repo.get_by_id(12345).await;

    assert!(matches!(result, Ok(None)));

    Ok(())
}

/// Tests that a free chapter stored with a non-zero price fails conversion.
///
/// The factory refuses to build such rows, so the row is inserted directly.
///
/// Expected: Err(InternalErr(FreeChapterPriced))
#[tokio::test]
async fn rejects_free_chapter_with_price() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    let corrupt = entity::chapter::ActiveModel {
        book_id: ActiveValue::Set(book.id),
        chapter_num: ActiveValue::Set(1),
        title: ActiveValue::Set("Prologue".to_string()),
        is_free: ActiveValue::Set(true),
        is_vip: ActiveValue::Set(false),
        price: ActiveValue::Set(99),
        word_count: ActiveValue::Set(1200),
        published_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let repo = ChapterRepository::new(db);
    let result = repo.get_by_id(corrupt.id).await;

    assert!(matches!(
        result,
        Err(AppError::InternalErr(InternalError::FreeChapterPriced { price: 99, .. }))
    ));

    Ok(())
}
