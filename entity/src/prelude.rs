pub use super::book::Entity as Book;
pub use super::book_purchase::Entity as BookPurchase;
pub use super::chapter::Entity as Chapter;
pub use super::chapter_purchase::Entity as ChapterPurchase;
pub use super::chapter_purchase_batch::Entity as ChapterPurchaseBatch;
pub use super::wallet::Entity as Wallet;
pub use super::wallet_transaction::Entity as WalletTransaction;
