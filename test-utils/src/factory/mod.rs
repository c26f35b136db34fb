//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let book = factory::book::create_book(&db).await?;
//! let chapter = factory::chapter::ChapterFactory::new(&db, book.id)
//!     .price(199)
//!     .vip(true)
//!     .build()
//!     .await?;
//! factory::wallet::create_wallet(&db, 42, 1_000).await?;
//! ```
//!
//! # Available Factories
//!
//! - `book` - Create book entities
//! - `chapter` - Create chapter entities (free, paid, VIP)
//! - `wallet` - Create funded wallets
//! - `purchase` - Insert ledger rows directly, bypassing the purchase flow
//! - `helpers` - ID generation and multi-entity helpers

pub mod book;
pub mod chapter;
pub mod helpers;
pub mod purchase;
pub mod wallet;

pub use book::create_book;
pub use chapter::{create_free_chapter, create_paid_chapter, create_vip_chapter};
pub use wallet::create_wallet;
