//! Fault injection for exercising failure paths.
//!
//! SQLite triggers let a test make writes to one table fail while reads keep working,
//! which is how the purchase tests simulate a ledger outage after a successful debit.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

/// Makes every INSERT into `table` abort with `message`.
///
/// # Arguments
/// - `db` - In-memory test database
/// - `table` - Table name to block inserts into
/// - `message` - Error message raised by the trigger
pub async fn reject_inserts(
    db: &DatabaseConnection,
    table: &str,
    message: &str,
) -> Result<(), DbErr> {
    let sql = format!(
        "CREATE TRIGGER reject_{table}_insert BEFORE INSERT ON {table} \
         BEGIN SELECT RAISE(ABORT, '{message}'); END;"
    );
    db.execute_unprepared(&sql).await?;

    Ok(())
}

/// Removes a trigger installed by [`reject_inserts`].
pub async fn allow_inserts(db: &DatabaseConnection, table: &str) -> Result<(), DbErr> {
    db.execute_unprepared(&format!("DROP TRIGGER IF EXISTS reject_{table}_insert;"))
        .await?;

    Ok(())
}
