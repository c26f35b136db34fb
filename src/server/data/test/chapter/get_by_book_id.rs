use super::*;

/// Tests that a book's chapters come back in chapter order regardless of insert order.
///
/// Expected: Ok with chapters sorted by chapter_num
#[tokio::test]
async fn orders_chapters_by_number() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    for num in [3, 1, 2] {
        factory::chapter::ChapterFactory::new(db, book.id)
            .chapter_num(num)
            .build()
            .await?;
    }

    let repo = ChapterRepository::new(db);
    let chapters = repo.get_by_book_id(book.id).await.unwrap();

    let numbers: Vec<i32> = chapters.iter().map(|c| c.chapter_num).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    Ok(())
}

/// Tests that chapters of other books are not returned.
///
/// Expected: Ok with only the requested book's chapters
#[tokio::test]
async fn excludes_other_books() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    let other = factory::create_book(db).await?;
    factory::create_paid_chapter(db, book.id, 100).await?;
    factory::create_paid_chapter(db, other.id, 100).await?;

    let repo = ChapterRepository::new(db);
    let chapters = repo.get_by_book_id(book.id).await.unwrap();

    assert_eq!(chapters.len(), 1);
    assert!(chapters.iter().all(|c| c.book_id == book.id));

    Ok(())
}

/// Tests that the paid listing skips free chapters but keeps VIP chapters.
///
/// Expected: Ok with the paid and VIP chapters only
#[tokio::test]
async fn paid_listing_skips_free_chapters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    let free = factory::create_free_chapter(db, book.id).await?;
    let paid = factory::create_paid_chapter(db, book.id, 100).await?;
    let vip = factory::create_vip_chapter(db, book.id, 200).await?;

    let repo = ChapterRepository::new(db);
    let chapters = repo.get_paid_by_book_id(book.id).await.unwrap();

    let ids: Vec<i32> = chapters.iter().map(|c| c.id).collect();
    assert!(!ids.contains(&free.id));
    assert!(ids.contains(&paid.id));
    assert!(ids.contains(&vip.id));

    Ok(())
}
