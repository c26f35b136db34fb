//! SeaORM entities for the catalog read side, the purchase ledger and the
//! wallet journal.

pub mod prelude;

pub mod book;
pub mod book_purchase;
pub mod chapter;
pub mod chapter_purchase;
pub mod chapter_purchase_batch;
pub mod wallet;
pub mod wallet_transaction;
