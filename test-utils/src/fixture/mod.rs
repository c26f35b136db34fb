//! In-memory entity fixtures.
//!
//! Fixtures build entity models without touching the database. Use them for pure
//! functions such as pricing and access decisions.

pub mod chapter;
