use super::*;

/// Tests depositing into a user without a wallet.
///
/// Expected: Ok with a new wallet holding the deposit
#[tokio::test]
async fn creates_wallet_on_first_deposit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_wallet_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WalletRepository::new(db);
    let balance = repo.deposit(user(5), cents(1_000), "deposit:5:1").await.unwrap();

    assert_eq!(balance, cents(1_000));
    assert_eq!(repo.balance(user(5)).await.unwrap(), Some(cents(1_000)));

    Ok(())
}

/// Tests depositing into an existing wallet.
///
/// Expected: Ok with the deposit added and journaled
#[tokio::test]
async fn adds_to_existing_wallet() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_wallet_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_wallet(db, 5, 250).await?;

    let repo = WalletRepository::new(db);
    let balance = repo.deposit(user(5), cents(50), "deposit:5:2").await.unwrap();

    assert_eq!(balance, cents(300));

    let journal = journal_for(db, "deposit:5:2").await?;
    assert_eq!(journal.len(), 1);
    assert_eq!(journal[0].kind, "deposit");
    assert_eq!(journal[0].amount, 50);

    Ok(())
}
