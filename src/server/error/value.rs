use thiserror::Error;

/// Validation failures when constructing `Money` or `Rating` values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Monetary amounts are never negative.
    #[error("Amount cannot be negative: {0} cents")]
    NegativeAmount(i64),

    /// Amount string was not of the form `123`, `1.5` or `1.99`.
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    /// Arithmetic on amounts exceeded the representable range.
    #[error("Amount overflow")]
    AmountOverflow,

    /// Ratings are bounded to 0.0 - 5.0.
    #[error("Rating must be between 0.0 and 5.0, got {0}")]
    RatingOutOfRange(String),
}
