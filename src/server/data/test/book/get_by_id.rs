use super::*;

/// Tests fetching an existing book with a rating.
///
/// Expected: Ok(Some) with the rating rounded to one decimal place
#[tokio::test]
async fn returns_book_with_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::book::BookFactory::new(db)
        .title("The Long Road")
        .author("A. Writer")
        .rating(Some(4.46))
        .build()
        .await?;

    let repo = BookRepository::new(db);
    let book = repo.get_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(book.id, created.id);
    assert_eq!(book.title, "The Long Road");
    assert_eq!(book.author, "A. Writer");
    assert_eq!(book.rating.map(|r| r.to_string()), Some("4.5".to_string()));

    Ok(())
}

/// Tests fetching a book ID that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_book() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BookRepository::new(db);
    let result = repo.get_by_id(999).await;

    assert!(matches!(result, Ok(None)));

    Ok(())
}

/// Tests that a stored rating outside 0-5 is reported as corrupt data.
///
/// Expected: Err(InternalErr)
#[tokio::test]
async fn rejects_out_of_range_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::book::BookFactory::new(db)
        .rating(Some(7.5))
        .build()
        .await?;

    let repo = BookRepository::new(db);
    let result = repo.get_by_id(created.id).await;

    assert!(matches!(
        result,
        Err(AppError::InternalErr(InternalError::InvalidStoredValue { .. }))
    ));

    Ok(())
}
