//! Fixed-point currency amounts.
//!
//! All prices, balances and purchase totals are carried as `Money`, a non-negative
//! count of cents. Amounts cross the API boundary as integer cents and are rendered
//! for humans with two decimal places.

use std::{fmt, str::FromStr};

use crate::server::error::value::ValueError;

/// A non-negative amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount from a count of cents.
    ///
    /// # Returns
    /// - `Ok(Money)` - Valid amount
    /// - `Err(ValueError::NegativeAmount)` - `cents` was below zero
    pub fn from_cents(cents: i64) -> Result<Self, ValueError> {
        if cents < 0 {
            return Err(ValueError::NegativeAmount(cents));
        }

        Ok(Self(cents))
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, failing instead of wrapping on overflow.
    pub fn checked_add(self, other: Money) -> Result<Money, ValueError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(ValueError::AmountOverflow)
    }

    /// Sums a sequence of amounts, failing on overflow.
    pub fn checked_sum<I>(amounts: I) -> Result<Money, ValueError>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

impl FromStr for Money {
    type Err = ValueError;

    /// Parses `"12"`, `"1.5"` or `"1.99"` into cents. At most two decimal places.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueError::InvalidAmount(s.to_string());
        let trimmed = s.trim();

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (trimmed, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let fraction_cents = match fraction {
            None => 0,
            Some(f) if f.is_empty() || f.len() > 2 || !f.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(invalid())
            }
            Some(f) => {
                let digits: i64 = f.parse().map_err(|_| invalid())?;
                if f.len() == 1 {
                    digits * 10
                } else {
                    digits
                }
            }
        };

        let whole: i64 = whole.parse().map_err(|_| ValueError::AmountOverflow)?;

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .map(Money)
            .ok_or(ValueError::AmountOverflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
