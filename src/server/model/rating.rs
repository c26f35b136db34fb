use std::fmt;

use crate::server::error::value::ValueError;

/// Book rating between 0.0 and 5.0 with one decimal of precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MAX_TENTHS: u8 = 50;

    /// Creates a rating, rounding to the nearest tenth.
    ///
    /// # Returns
    /// - `Ok(Rating)` - Value within 0.0 - 5.0
    /// - `Err(ValueError::RatingOutOfRange)` - NaN, infinite or outside the range
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() || !(0.0..=5.0).contains(&value) {
            return Err(ValueError::RatingOutOfRange(value.to_string()));
        }

        let tenths = (value * 10.0).round() as u8;

        Ok(Self(tenths.min(Self::MAX_TENTHS)))
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}
