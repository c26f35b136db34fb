use thiserror::Error;

/// Internal issues with stored data indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A chapter flagged free was stored with a non-zero price.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Chapter {chapter_id} is free but stored with price {price}")]
    FreeChapterPriced {
        /// The offending chapter
        chapter_id: i32,
        /// The stored price in cents
        price: i64,
    },

    /// A stored monetary amount or rating was outside its valid range.
    #[error("Invalid stored value for {field} on {record}: {reason}")]
    InvalidStoredValue {
        /// Record description, e.g. `chapter 12`
        record: String,
        /// Column name
        field: &'static str,
        /// Validation failure
        reason: String,
    },

    /// A stored user ID could not be converted to a `UserId`.
    #[error("Invalid stored user ID {0}")]
    InvalidStoredUserId(i64),
}
