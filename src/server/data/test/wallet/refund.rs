use super::*;

/// Tests refunding a previous debit.
///
/// Expected: Ok with balance restored and a refund journal entry
#[tokio::test]
async fn restores_debited_amount() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_wallet_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_wallet(db, 3, 400).await?;

    let repo = WalletRepository::new(db);
    repo.debit(user(3), cents(150), "chapter:3:9:x").await.unwrap();
    repo.refund(user(3), cents(150), "chapter:3:9:x").await.unwrap();

    assert_eq!(repo.balance(user(3)).await.unwrap(), Some(cents(400)));

    let journal = journal_for(db, "chapter:3:9:x").await?;
    assert_eq!(journal.len(), 2);
    assert!(journal.iter().any(|t| t.kind == "refund" && t.amount == 150));

    Ok(())
}

/// Tests that refunding the same reference twice credits the wallet once.
///
/// Expected: Ok both times with a single refund applied
#[tokio::test]
async fn repeated_refund_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_wallet_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_wallet(db, 3, 400).await?;

    let repo = WalletRepository::new(db);
    repo.debit(user(3), cents(150), "chapter:3:9:y").await.unwrap();
    repo.refund(user(3), cents(150), "chapter:3:9:y").await.unwrap();
    let second = repo.refund(user(3), cents(150), "chapter:3:9:y").await;

    assert!(second.is_ok());
    assert_eq!(repo.balance(user(3)).await.unwrap(), Some(cents(400)));

    let refunds = journal_for(db, "chapter:3:9:y")
        .await?
        .into_iter()
        .filter(|t| t.kind == "refund")
        .count();
    assert_eq!(refunds, 1);

    Ok(())
}

/// Tests refunding a user who has no wallet.
///
/// Expected: Err(InternalError) with nothing journaled
#[tokio::test]
async fn fails_without_wallet() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_wallet_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WalletRepository::new(db);
    let result = repo.refund(user(4), cents(10), "chapter:4:1:z").await;

    assert!(matches!(result, Err(AppError::InternalError(_))));
    assert!(journal_for(db, "chapter:4:1:z").await?.is_empty());

    Ok(())
}
