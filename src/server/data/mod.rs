//! Database repository layer.
//!
//! Repositories wrap SeaORM queries for the catalog read side, the purchase ledger and
//! the wallet. Entity models are converted to domain models at this boundary, so
//! stored-data invariant violations surface here as `InternalError`s.

pub mod book;
pub mod chapter;
pub mod purchase;
pub mod wallet;

#[cfg(test)]
mod test;

use sea_orm::{DbErr, SqlErr};

/// Whether a database error is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
