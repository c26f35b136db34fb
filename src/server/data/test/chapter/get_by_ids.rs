use super::*;

/// Tests looking up a mixed set of chapter IDs, including one that does not exist.
///
/// Expected: Ok with the existing chapters ordered by book then chapter number
#[tokio::test]
async fn returns_existing_chapters_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    let later = factory::chapter::ChapterFactory::new(db, book.id)
        .chapter_num(2)
        .build()
        .await?;
    let earlier = factory::chapter::ChapterFactory::new(db, book.id)
        .chapter_num(1)
        .build()
        .await?;

    let repo = ChapterRepository::new(db);
    let chapters = repo
        .get_by_ids(&[later.id, 999_999, earlier.id])
        .await
        .unwrap();
    let ids: Vec<i32> = chapters.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![earlier.id, later.id]);

    assert!(repo.get_by_ids(&[]).await.unwrap().is_empty());

    Ok(())
}

/// Tests the free-chapter lookup honours its limit.
///
/// Expected: Ok with the earliest free chapters only
#[tokio::test]
async fn limits_free_chapters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    let first = factory::create_free_chapter(db, book.id).await?;
    factory::create_paid_chapter(db, book.id, 100).await?;
    let second = factory::create_free_chapter(db, book.id).await?;
    factory::create_free_chapter(db, book.id).await?;

    let chapters = ChapterRepository::new(db)
        .get_free_by_book_id(book.id, 2)
        .await
        .unwrap();

    let ids: Vec<i32> = chapters.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    Ok(())
}

/// Tests that only chapters flagged VIP are returned.
///
/// Expected: Ok with the VIP chapter alone
#[tokio::test]
async fn filters_vip_chapters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let book = factory::create_book(db).await?;
    factory::create_paid_chapter(db, book.id, 100).await?;
    let vip = factory::create_vip_chapter(db, book.id, 300).await?;

    let chapters = ChapterRepository::new(db)
        .get_vip_by_book_id(book.id)
        .await
        .unwrap();

    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].id, vip.id);

    Ok(())
}
