//! Pricing engine.
//!
//! Pure functions computing single-chapter prices, discounted bundle prices and the
//! split of a bundle price across its chapters. All arithmetic is done in integer
//! cents; intermediate products are widened to `i128` so no input can overflow.

use crate::server::{
    error::{purchase::PurchaseError, value::ValueError, AppError},
    model::{chapter::Chapter, money::Money},
};

/// Price charged for buying a single chapter: zero when free, else its list price.
pub fn chapter_price(chapter: &Chapter) -> Money {
    if chapter.is_free {
        Money::ZERO
    } else {
        chapter.price
    }
}

/// Undiscounted sum of `chapter_price` over the non-free chapters.
pub fn paid_total(chapters: &[Chapter]) -> Result<Money, AppError> {
    Ok(Money::checked_sum(
        chapters.iter().filter(|c| c.is_paid()).map(chapter_price),
    )?)
}

/// Discounted price for buying the non-free chapters as one bundle.
///
/// `sum * (100 - discount_percent) / 100`, rounded half-up to the nearest cent.
///
/// # Returns
/// - `Ok(Money)` - Bundle price
/// - `Err(PurchaseError::InvalidDiscount)` - `discount_percent` outside 0-100
pub fn book_bundle_price(chapters: &[Chapter], discount_percent: i32) -> Result<Money, AppError> {
    if !(0..=100).contains(&discount_percent) {
        return Err(PurchaseError::InvalidDiscount(discount_percent).into());
    }

    let sum = i128::from(paid_total(chapters)?.cents());
    let numerator = sum * i128::from(100 - discount_percent);
    let discounted = (numerator * 2 + 100) / 200;

    Ok(money_from_i128(discounted)?)
}

/// Splits `bundle` across chapters in proportion to their `prices`.
///
/// Each share is `round(price * bundle / sum(prices))`, capped so the running total
/// never exceeds `bundle`; the final share takes whatever remains. The result
/// always sums to `bundle` exactly and contains no negative amounts.
///
/// # Returns
/// - `Ok(Vec<Money>)` - One share per price, in order
/// - `Err(AppError::InternalError)` - A non-zero bundle with no chapters to carry it
pub fn allocate_bundle(prices: &[Money], bundle: Money) -> Result<Vec<Money>, AppError> {
    let Some((_, leading)) = prices.split_last() else {
        if bundle.is_zero() {
            return Ok(Vec::new());
        }
        return Err(AppError::InternalError(format!(
            "Cannot allocate bundle price {} across zero chapters",
            bundle
        )));
    };

    let total: i128 = prices.iter().map(|p| i128::from(p.cents())).sum();
    let bundle_cents = i128::from(bundle.cents());
    let mut remaining = bundle_cents;
    let mut shares = Vec::with_capacity(prices.len());

    for price in leading {
        let proportional = if total == 0 {
            0
        } else {
            (i128::from(price.cents()) * bundle_cents * 2 + total) / (2 * total)
        };
        let share = proportional.min(remaining);

        remaining -= share;
        shares.push(money_from_i128(share)?);
    }

    shares.push(money_from_i128(remaining)?);

    Ok(shares)
}

fn money_from_i128(cents: i128) -> Result<Money, ValueError> {
    let cents = i64::try_from(cents).map_err(|_| ValueError::AmountOverflow)?;
    Money::from_cents(cents)
}
