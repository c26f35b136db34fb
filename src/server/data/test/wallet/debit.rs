use super::*;

/// Tests debiting a wallet that holds enough funds.
///
/// Expected: Ok with balance reduced and a negative journal entry
#[tokio::test]
async fn debits_sufficient_balance() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_wallet_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_wallet(db, 7, 500).await?;

    let repo = WalletRepository::new(db);
    let result = repo.debit(user(7), cents(199), "chapter:7:1:a").await;

    assert!(result.is_ok());
    assert_eq!(repo.balance(user(7)).await.unwrap(), Some(cents(301)));

    let journal = journal_for(db, "chapter:7:1:a").await?;
    assert_eq!(journal.len(), 1);
    assert_eq!(journal[0].amount, -199);
    assert_eq!(journal[0].kind, "debit");

    Ok(())
}

/// Tests that a debit of exactly the balance succeeds and leaves zero.
///
/// Expected: Ok with balance 0
#[tokio::test]
async fn debits_entire_balance() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_wallet_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_wallet(db, 7, 250).await?;

    let repo = WalletRepository::new(db);
    repo.debit(user(7), cents(250), "book:7:1:a").await.unwrap();

    assert_eq!(repo.balance(user(7)).await.unwrap(), Some(Money::ZERO));

    Ok(())
}

/// Tests debiting more than the wallet holds.
///
/// Expected: Err(InsufficientBalance) with balance and journal untouched
#[tokio::test]
async fn rejects_insufficient_balance() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_wallet_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_wallet(db, 7, 100).await?;

    let repo = WalletRepository::new(db);
    let result = repo.debit(user(7), cents(101), "chapter:7:1:b").await;

    assert!(matches!(
        result,
        Err(AppError::PurchaseErr(PurchaseError::InsufficientBalance))
    ));
    assert_eq!(repo.balance(user(7)).await.unwrap(), Some(cents(100)));
    assert!(journal_for(db, "chapter:7:1:b").await?.is_empty());

    Ok(())
}

/// Tests debiting a user who has no wallet at all.
///
/// Expected: Err(InsufficientBalance)
#[tokio::test]
async fn rejects_user_without_wallet() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_wallet_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WalletRepository::new(db);
    let result = repo.debit(user(8), cents(1), "chapter:8:1:c").await;

    assert!(matches!(
        result,
        Err(AppError::PurchaseErr(PurchaseError::InsufficientBalance))
    ));
    assert_eq!(repo.balance(user(8)).await.unwrap(), None);

    Ok(())
}
